//! Fitted per-column transforms for the passthrough fields.
//!
//! All three are deterministic wrappers around parameters learned offline.
//! Unknown categorical values are rejected rather than defaulted: a silent
//! substitute would produce a silently wrong prediction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::PipelineError;

/// Learned target statistic per environment category.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetEncoder {
    pub mapping: IndexMap<String, f64>,
}

impl TargetEncoder {
    pub fn encode(&self, category: &str) -> Result<f64, PipelineError> {
        self.mapping
            .get(category)
            .copied()
            .ok_or_else(|| PipelineError::UnknownCategory {
                column: "environment".into(),
                value: category.to_string(),
                suggestion: closest(category, self.mapping.keys()),
            })
    }
}

/// Fitted label encoding for UNS alloy codes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelEncoder {
    /// Fitted vocabulary; the encoded value is the position here.
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn encode(&self, code: &str) -> Result<usize, PipelineError> {
        self.classes
            .iter()
            .position(|known| known == code)
            .ok_or_else(|| PipelineError::UnknownCategory {
                column: "uns".into(),
                value: code.to_string(),
                suggestion: closest(code, self.classes.iter()),
            })
    }
}

/// Fitted affine temperature scaler.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AffineScaler {
    pub mean: f64,
    pub scale: f64,
}

impl AffineScaler {
    /// Total for numeric input; the zero-scale case is rejected at load.
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }
}

/// Closest fitted value by Jaro-Winkler similarity, for error messages.
fn closest<'a, I>(value: &str, known: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let target = value.to_lowercase();
    known
        .into_iter()
        .map(|candidate| (jaro_winkler(&target, &candidate.to_lowercase()), candidate))
        .filter(|(score, _)| *score > 0.82)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, candidate)| candidate.clone())
}
