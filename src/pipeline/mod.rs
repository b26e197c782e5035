//! Feature-composition pipeline orchestration.

pub mod compose;
pub mod encoders;
pub mod lexical;
pub mod normalize;
pub mod reduce;
pub mod vectorize;

use serde::Serialize;
use tracing::debug;

use crate::{
    error::PipelineError,
    model::{artifacts::ArtifactSet, classifier::Classify, labels::Severity},
};

use compose::{ComposedFeatureRow, RawObservation};

/// Outcome of one prediction request.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub severity: Severity,
    pub class_id: i64,
    pub row: ComposedFeatureRow,
}

/// Run the full pipeline for one observation: compose the feature row,
/// classify it, and map the class id to a severity label.
pub fn predict(
    artifacts: &ArtifactSet,
    obs: &RawObservation,
) -> Result<PredictionResult, PipelineError> {
    let row = compose::compose(artifacts, obs)?;
    let features = row.to_array();
    let class_id = artifacts.classifier.predict(features.view())?;
    let severity = Severity::from_class_id(class_id)?;
    debug!(class_id, severity = %severity, "classified observation");
    Ok(PredictionResult {
        severity,
        class_id,
        row,
    })
}
