//! CLI entry-point for printing the fitted column schema.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, model::artifacts::ArtifactSet};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let artifacts = ArtifactSet::load(&settings)?;
    println!("variant: {}", artifacts.variant.as_str());
    println!("reduction input width: {}", artifacts.reducer.input_width());
    println!("composed columns:");
    for name in artifacts.composed_columns() {
        println!("  {name}");
    }
    Ok(())
}
