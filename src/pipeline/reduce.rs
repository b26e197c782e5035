//! Fitted principal-component projection.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Fitted linear projection with an explicit input-column schema.
///
/// The ordered `input_columns` list is the schema the composer must
/// assemble; it is validated against the variant layout once at
/// artifact-load time and the width is re-asserted on every call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PcaReducer {
    /// Ordered column names the projection was fitted on.
    pub input_columns: Vec<String>,
    /// Per-feature means subtracted before projection.
    pub mean: Vec<f64>,
    /// Row-major loadings, one row per output component.
    pub components: Vec<Vec<f64>>,
}

impl PcaReducer {
    pub fn input_width(&self) -> usize {
        self.input_columns.len()
    }

    pub fn output_width(&self) -> usize {
        self.components.len()
    }

    /// Output column names, `PCA_1` through `PCA_k` in component order.
    pub fn component_names(&self) -> Vec<String> {
        (1..=self.output_width())
            .map(|idx| format!("PCA_{idx}"))
            .collect()
    }

    /// Check internal consistency once at artifact-load time.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.mean.len() != self.input_width() {
            return Err(PipelineError::ShapeMismatch {
                stage: "reducer mean vector",
                expected: self.input_width(),
                actual: self.mean.len(),
            });
        }
        for row in &self.components {
            if row.len() != self.input_width() {
                return Err(PipelineError::ShapeMismatch {
                    stage: "reducer component loadings",
                    expected: self.input_width(),
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Project one assembled row onto the fitted components.
    ///
    /// Missing values (NaN) centre to the fitted mean, so an absent
    /// lexical quantity contributes nothing to any component.
    pub fn reduce(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if row.len() != self.input_width() {
            return Err(PipelineError::ShapeMismatch {
                stage: "reducer input",
                expected: self.input_width(),
                actual: row.len(),
            });
        }
        let centred: Vec<f64> = row
            .iter()
            .zip(&self.mean)
            .map(|(value, mean)| if value.is_nan() { 0.0 } else { value - mean })
            .collect();
        Ok(self
            .components
            .iter()
            .map(|loadings| {
                loadings
                    .iter()
                    .zip(&centred)
                    .map(|(weight, value)| weight * value)
                    .sum()
            })
            .collect())
    }
}
