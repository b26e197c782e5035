//! Text vectorization strategies over the normalized comment.

use serde::{Deserialize, Serialize};

#[cfg(feature = "embeddings")]
use fastembed::TextEmbedding;
#[cfg(feature = "embeddings")]
use once_cell::sync::OnceCell;
#[cfg(feature = "embeddings")]
use tracing::info;

use crate::error::PipelineError;

/// Fitted vocabulary-based term weighting, loaded from a JSON artifact.
///
/// Columns are named by vocabulary term, in the order established at fit
/// time. Transform output is L2-normalised term counts weighted by idf.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TfidfVectorizer {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check the idf table against the vocabulary once at load time.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(PipelineError::ShapeMismatch {
                stage: "tfidf idf table",
                expected: self.vocabulary.len(),
                actual: self.idf.len(),
            });
        }
        Ok(())
    }

    /// Weight the normalized comment against the fitted vocabulary.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0f64; self.vocabulary.len()];
        for token in text.split_whitespace() {
            if let Some(idx) = self.vocabulary.iter().position(|term| term == token) {
                counts[idx] += 1.0;
            }
        }
        let mut weighted: Vec<f64> = counts
            .iter()
            .zip(&self.idf)
            .map(|(count, idf)| count * idf)
            .collect();
        let norm = weighted.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut weighted {
                *value /= norm;
            }
        }
        weighted
    }
}

#[cfg(feature = "embeddings")]
static EMBEDDER: OnceCell<TextEmbedding> = OnceCell::new();

/// Embed the normalized comment with the process-wide cached model.
///
/// The model loads lazily on first use and at most once per process
/// lifetime; concurrent callers share the cached instance read-only.
#[cfg(feature = "embeddings")]
pub fn embed(text: &str) -> Result<Vec<f64>, PipelineError> {
    let embedder = EMBEDDER.get_or_try_init(|| {
        info!("loading text embedding model");
        TextEmbedding::try_new(Default::default())
            .map_err(|err| PipelineError::Embedding(err.to_string()))
    })?;
    let mut vectors = embedder
        .embed(vec![text], None)
        .map_err(|err| PipelineError::Embedding(err.to_string()))?;
    let vector = vectors
        .pop()
        .ok_or_else(|| PipelineError::Embedding("model returned no vector".into()))?;
    Ok(vector.into_iter().map(f64::from).collect())
}

/// Stub when the embedding model is compiled out.
#[cfg(not(feature = "embeddings"))]
pub fn embed(_text: &str) -> Result<Vec<f64>, PipelineError> {
    Err(PipelineError::EmbeddingsDisabled)
}
