//! Pokédex type classifier CLI
//!
//! Predicts a Pokémon's primary type from the command line using the same
//! artifacts and reducer as the web server, and lists the vocabularies the
//! model knows about.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use classifier_lib::FormInput;
use commands::{predict, schema, vocab};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pokédex type classifier CLI
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(
    author,
    version,
    about = "CLI for the Pokédex primary-type classifier",
    long_about = None
)]
pub struct Cli {
    /// Directory holding the model artifacts (can also be set via POKEDEX_ARTIFACT_DIR)
    #[arg(long, env = "POKEDEX_ARTIFACT_DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the primary type from the 12 attributes
    Predict(PredictArgs),

    /// Show the feature columns the classifier expects
    Schema,

    /// List the abilities known to the encoder
    Abilities,

    /// List the type palette
    Types,
}

/// Attributes for a single prediction. Out-of-range values are clamped.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Pokémon name (display only)
    #[arg(long, default_value_t = FormInput::default().name)]
    pub name: String,

    /// Base HP
    #[arg(long, default_value_t = i64::from(FormInput::default().hp))]
    pub hp: i64,

    /// Base Attack
    #[arg(long, default_value_t = i64::from(FormInput::default().atk))]
    pub atk: i64,

    /// Base Defense
    #[arg(long, default_value_t = i64::from(FormInput::default().def))]
    pub def: i64,

    /// Base Special Attack
    #[arg(long, default_value_t = i64::from(FormInput::default().spa))]
    pub spa: i64,

    /// Base Special Defense
    #[arg(long, default_value_t = i64::from(FormInput::default().spd))]
    pub spd: i64,

    /// Base Speed
    #[arg(long, default_value_t = i64::from(FormInput::default().speed))]
    pub speed: i64,

    /// Height in meters
    #[arg(long, default_value_t = FormInput::default().height)]
    pub height: f64,

    /// Weight in kilograms
    #[arg(long, default_value_t = FormInput::default().weight)]
    pub weight: f64,

    /// Main ability
    #[arg(long, default_value_t = FormInput::default().ability)]
    pub ability: String,

    /// Color (Yellow, Blue, Red, Green, White or Black)
    #[arg(long, default_value_t = FormInput::default().color)]
    pub color: String,

    /// Generation
    #[arg(long, default_value_t = i64::from(FormInput::default().generation))]
    pub generation: i64,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::Config::load()?;
    let artifact_dir = config.artifact_dir(cli.artifact_dir);
    let format = cli.format.unwrap_or_else(|| config.format());

    match cli.command {
        Commands::Predict(args) => predict::run(&artifact_dir, args, format)?,
        Commands::Schema => schema::show_schema(&artifact_dir, format)?,
        Commands::Abilities => vocab::list_abilities(&artifact_dir, format)?,
        Commands::Types => vocab::list_types(format)?,
    }

    Ok(())
}
