//! Server configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port for the page, JSON API and health/metrics endpoints
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding classifier.json, scaler.json and abilities_encoder.json
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Optional background image for the page
    #[serde(default = "default_background_path")]
    pub background_path: PathBuf,

    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    /// Instance name attached to structured log events
    #[serde(default = "default_instance")]
    pub instance: String,
}

fn default_port() -> u16 {
    8080
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("./artifacts")
}

fn default_background_path() -> PathBuf {
    PathBuf::from("./assets/background.png")
}

fn default_title() -> String {
    "Pokémon Classifier".to_string()
}

fn default_instance() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "local".to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            artifact_dir: default_artifact_dir(),
            background_path: default_background_path(),
            title: default_title(),
            instance: default_instance(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `POKEDEX_*` environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("POKEDEX"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid configuration, using defaults");
            ServerConfig::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.artifact_dir, PathBuf::from("./artifacts"));
        assert_eq!(config.title, "Pokémon Classifier");
    }

    #[test]
    fn test_partial_source_fills_defaults() {
        let config: ServerConfig = config::Config::builder()
            .set_override("port", 9000)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.background_path, PathBuf::from("./assets/background.png"));
    }
}
