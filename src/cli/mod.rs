//! Command-line interface wiring for corrosion-assistant.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod batch;
pub mod inspect;
pub mod materials;
pub mod predict;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Corrosion severity assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Predict(args) => predict::run(args, settings).await,
            Commands::Batch(args) => batch::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Inspect => inspect::run(settings).await,
            Commands::SelectMaterial(args) => materials::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Predict severity for a single observation.
    Predict(predict::Args),
    /// Score a CSV of observations.
    Batch(batch::Args),
    /// Serve the JSON API.
    Serve(serve::Args),
    /// Print the fitted column schema.
    Inspect,
    /// Recommend materials for a described corrosion environment.
    SelectMaterial(materials::Args),
}
