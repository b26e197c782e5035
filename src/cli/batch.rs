//! CLI entry-point for scoring a CSV of observations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    model::artifacts::ArtifactSet,
    pipeline::{self, compose::RawObservation},
};

/// Args for the `batch` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// CSV of observations with headers
    /// environment,temperature_c,concentration_pct,uns,condition_text.
    #[arg(long)]
    pub input: PathBuf,
    /// Output CSV path; defaults to a timestamped file in the outputs dir.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let artifacts = ArtifactSet::load(&settings)?;
    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("reading observations from {}", args.input.display()))?;
    let output = args.output.unwrap_or_else(|| {
        settings.join_output(format!(
            "predictions-{}.csv",
            Utc::now().format("%Y%m%dT%H%M%SZ")
        ))
    });
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record([
        "environment",
        "temperature_c",
        "concentration_pct",
        "uns",
        "condition_text",
        "severity",
        "class_id",
    ])?;

    let mut scored = 0usize;
    let mut rejected = 0usize;
    for record in reader.deserialize::<RawObservation>() {
        let obs = record?;
        match pipeline::predict(&artifacts, &obs) {
            Ok(result) => {
                writer.write_record([
                    obs.environment.as_str(),
                    &obs.temperature_c.to_string(),
                    &obs.concentration_pct.to_string(),
                    obs.uns.as_str(),
                    obs.condition_text.as_str(),
                    result.severity.as_str(),
                    &result.class_id.to_string(),
                ])?;
                scored += 1;
            }
            // Bad categorical input skips the row; internal failures abort.
            Err(err) if !err.is_internal() => {
                warn!(error = %err, "skipping observation");
                rejected += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    writer.flush()?;
    info!(path = %output.display(), scored, rejected, "wrote predictions");
    Ok(())
}
