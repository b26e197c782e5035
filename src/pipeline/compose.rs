//! Column assembly for the fitted classifier.
//!
//! This is the error-prone centre of the pipeline: the reduction input and
//! the final row must reproduce the training-time column set, order, and
//! encoding exactly, or the classifier scores garbage without complaint.

use indexmap::IndexMap;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::PipelineError,
    model::{
        artifacts::{ArtifactSet, PASSTHROUGH_COLUMNS},
        classifier::Classify,
    },
    pipeline::{lexical, normalize},
};

/// User-supplied input for one prediction request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawObservation {
    pub environment: String,
    pub temperature_c: f64,
    pub concentration_pct: f64,
    pub uns: String,
    #[serde(default)]
    pub condition_text: String,
}

/// Single-row table with a fixed column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedFeatureRow {
    columns: IndexMap<String, f64>,
}

impl ComposedFeatureRow {
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// Insert a column; a repeated name keeps the first occurrence.
    pub fn insert(&mut self, name: String, value: f64) {
        self.columns.entry(name).or_insert(value);
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns.get(name).copied()
    }

    /// Values in column order, ready for the classifier.
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_iter(self.columns.values().copied())
    }
}

impl Default for ComposedFeatureRow {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the exact feature row the fitted classifier expects.
///
/// Lexical signals read the raw comment while the vectorizer reads the
/// normalized comment. The fitted artifacts observed exactly this split,
/// so the two inputs stay deliberately distinct.
pub fn compose(
    artifacts: &ArtifactSet,
    obs: &RawObservation,
) -> Result<ComposedFeatureRow, PipelineError> {
    let normalized = normalize::normalize(&obs.condition_text);
    let lexical_features = lexical::extract(&obs.condition_text);
    let text_vector = artifacts.vectorize(&normalized)?;

    let mut reduction_input = Vec::with_capacity(artifacts.reducer.input_width());
    if artifacts.variant.includes_lexical_block() {
        reduction_input.extend_from_slice(lexical_features.values());
    }
    reduction_input.extend(text_vector);
    let reduced = artifacts.reducer.reduce(&reduction_input)?;

    let [env_col, uns_col, temp_col, conc_col] = PASSTHROUGH_COLUMNS;
    let mut row = ComposedFeatureRow::new();
    row.insert(
        env_col.to_string(),
        artifacts.environment_encoder.encode(&obs.environment)?,
    );
    row.insert(
        uns_col.to_string(),
        artifacts.uns_encoder.encode(&obs.uns)? as f64,
    );
    row.insert(
        temp_col.to_string(),
        artifacts.temperature_scaler.scale(obs.temperature_c),
    );
    row.insert(conc_col.to_string(), obs.concentration_pct);
    for (name, value) in artifacts
        .reducer
        .component_names()
        .into_iter()
        .zip(reduced)
    {
        row.insert(name, value);
    }

    let expected = artifacts.classifier.n_features();
    if row.width() != expected {
        return Err(PipelineError::ShapeMismatch {
            stage: "composed row",
            expected,
            actual: row.width(),
        });
    }
    debug!(width = row.width(), "composed feature row");
    Ok(row)
}
