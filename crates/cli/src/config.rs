//! Configuration management for the CLI

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_ARTIFACT_DIR: &str = "./artifacts";

/// CLI configuration read from `~/.config/pokedex/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Artifact directory used when no flag or env var is given
    pub artifact_dir: Option<PathBuf>,
    /// Default output format ("table" or "json")
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// The flag/env value wins over the config file
    pub fn artifact_dir(&self, cli_value: Option<PathBuf>) -> PathBuf {
        cli_value
            .or_else(|| self.artifact_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_DIR))
    }

    pub fn format(&self) -> OutputFormat {
        self.default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .unwrap_or_default()
    }

    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("pokedex").join("config.json"))
    }
}
