//! CLI entry-point for LLM-backed material selection.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    advisory::{self, MaterialQuery},
    config::Settings,
};

/// Args for the `select-material` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Environment category, e.g. "Seawater".
    #[arg(long)]
    pub environment: String,
    /// pH of the medium.
    #[arg(long, default_value_t = 7.0)]
    pub ph: f64,
    /// Chloride presence: None, Low, Moderate, or High.
    #[arg(long, default_value = "None")]
    pub chloride: String,
    /// Operating temperature in degrees Celsius.
    #[arg(long, default_value_t = 25.0)]
    pub temperature: f64,
    /// Operating pressure in bar.
    #[arg(long, default_value_t = 1.0)]
    pub pressure: f64,
    /// Flow condition: Static, Low velocity, High velocity, or Turbulent.
    #[arg(long, default_value = "Static")]
    pub flow: String,
    /// The part is in galvanic contact with other metals.
    #[arg(long)]
    pub galvanic_contact: bool,
    /// Required design life in years.
    #[arg(long, default_value_t = 10)]
    pub design_life: u32,
    /// Maintenance frequency: Low, Moderate, or High.
    #[arg(long, default_value = "Moderate")]
    pub maintenance: String,
    /// Budget constraint: None, Low, Medium, or High.
    #[arg(long, default_value = "None")]
    pub budget: String,
    /// Additional notes about the environment or design requirements.
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let query = MaterialQuery {
        environment: args.environment,
        ph: args.ph,
        chloride: args.chloride,
        temperature_c: args.temperature,
        pressure_bar: args.pressure,
        flow: args.flow,
        galvanic_contact: args.galvanic_contact,
        design_life_years: args.design_life,
        maintenance: args.maintenance,
        budget: args.budget,
        notes: args.notes,
    };
    let recommendation = advisory::recommend_materials(&settings, &query).await;
    println!("{recommendation}");
    Ok(())
}
