//! CLI entry-point for single-observation prediction.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    advisory,
    config::Settings,
    model::artifacts::ArtifactSet,
    pipeline::{self, compose::RawObservation},
};

/// Args for the `predict` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Environment category, e.g. "Seawater".
    #[arg(long)]
    pub environment: String,
    /// Temperature in degrees Celsius.
    #[arg(long, default_value_t = 25.0)]
    pub temperature: f64,
    /// Concentration of the surrounding medium as a percentage.
    #[arg(long, default_value_t = 50.0)]
    pub concentration: f64,
    /// UNS alloy code, e.g. "S30403".
    #[arg(long)]
    pub uns: String,
    /// Free-text condition description.
    #[arg(long, default_value = "")]
    pub condition: String,
    /// Also generate advisory text for the prediction.
    #[arg(long)]
    pub advise: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let artifacts = ArtifactSet::load(&settings)?;
    let obs = RawObservation {
        environment: args.environment,
        temperature_c: args.temperature,
        concentration_pct: args.concentration,
        uns: args.uns,
        condition_text: args.condition,
    };
    let result = pipeline::predict(&artifacts, &obs)?;
    info!(severity = %result.severity, class_id = result.class_id, "prediction complete");
    println!(
        "severity: {} ({})",
        result.severity,
        result.severity.rate_band()
    );
    if args.advise {
        let advisory = advisory::advise(&settings, &obs, &result).await;
        println!("\n{advisory}");
    }
    Ok(())
}
