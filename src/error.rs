//! Error taxonomy for the feature-composition pipeline.

use thiserror::Error;

/// Failures the pipeline surfaces to its immediate caller.
///
/// Unknown categories are user-input problems; everything else indicates a
/// pipeline-assembly or artifact-consistency defect. Advisory-generation
/// failures are not represented here: they are recovered locally with a
/// marked fallback message and never abort the prediction.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Categorical value missing from the fitted encoder vocabulary.
    #[error("unknown {column} value {value:?}{}", .suggestion.as_deref().map(|s| format!("; closest fitted value is {s:?}")).unwrap_or_default())]
    UnknownCategory {
        column: String,
        value: String,
        suggestion: Option<String>,
    },

    /// Assembled width disagrees with what a fitted artifact expects.
    #[error("{stage} expected width {expected} but got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Classifier produced an integer outside the label table.
    #[error("classifier returned class id {class_id} with no label mapping")]
    UnmappedClass { class_id: i64 },

    /// The selected variant needs the embedding model, which this build
    /// was compiled without.
    #[error("pipeline variant requires the `embeddings` feature, which is disabled in this build")]
    EmbeddingsDisabled,

    /// The embedding model failed to load or to produce a vector.
    #[error("embedding model failure: {0}")]
    Embedding(String),
}

impl PipelineError {
    /// Internal-consistency failures, as opposed to bad user input.
    pub fn is_internal(&self) -> bool {
        !matches!(self, Self::UnknownCategory { .. })
    }
}
