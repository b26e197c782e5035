//! One-shot loading and cross-validation of fitted artifacts.
//!
//! Every artifact is a small JSON document produced by the offline fitting
//! process. Loading happens once at process start; the resulting
//! [`ArtifactSet`] is immutable and shared read-only across requests.

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{ensure, Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{
    config::Settings,
    error::PipelineError,
    model::classifier::{Classify, ForestClassifier},
    pipeline::{
        encoders::{AffineScaler, LabelEncoder, TargetEncoder},
        lexical,
        reduce::PcaReducer,
        vectorize::{self, TfidfVectorizer},
    },
};

/// Columns carried through the pipeline without entering the reduction,
/// in composed-row order.
pub const PASSTHROUGH_COLUMNS: [&str; 4] = [
    "Environment",
    "UNS",
    "Temperature (deg C)",
    "Concentration_clean",
];

/// Named pipeline configurations. Each variant binds a fixed set of
/// artifact files and a fixed reduction-input layout; the choice is made
/// at deployment time, never per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineVariant {
    /// Lexical block plus TF-IDF terms feed the reducer.
    TfidfPca,
    /// A dense text embedding alone feeds the reducer.
    EmbeddingPca,
}

impl PipelineVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TfidfPca => "tfidf-pca",
            Self::EmbeddingPca => "embedding-pca",
        }
    }

    /// Whether the lexical feature block joins the reduction input.
    pub fn includes_lexical_block(&self) -> bool {
        matches!(self, Self::TfidfPca)
    }

    fn reducer_file(&self) -> &'static str {
        match self {
            Self::TfidfPca => "pca_tfidf.json",
            Self::EmbeddingPca => "pca_embedding.json",
        }
    }
}

impl std::str::FromStr for PipelineVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tfidf-pca" => Ok(Self::TfidfPca),
            "embedding-pca" => Ok(Self::EmbeddingPca),
            other => anyhow::bail!("unknown pipeline variant {other:?}"),
        }
    }
}

/// The vectorization strategy bound by the variant.
#[derive(Debug)]
pub enum TextVectorizerArtifact {
    Tfidf(TfidfVectorizer),
    Embedding,
}

/// Every fitted artifact the pipeline needs, loaded once and never
/// mutated afterwards.
pub struct ArtifactSet {
    pub variant: PipelineVariant,
    pub environment_encoder: TargetEncoder,
    pub uns_encoder: LabelEncoder,
    pub temperature_scaler: AffineScaler,
    pub text_vectorizer: TextVectorizerArtifact,
    pub reducer: PcaReducer,
    pub classifier: Arc<dyn Classify>,
}

impl std::fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("variant", &self.variant)
            .field("environment_encoder", &self.environment_encoder)
            .field("uns_encoder", &self.uns_encoder)
            .field("temperature_scaler", &self.temperature_scaler)
            .field("text_vectorizer", &self.text_vectorizer)
            .field("reducer", &self.reducer)
            .field("classifier", &"<dyn Classify>")
            .finish()
    }
}

impl ArtifactSet {
    /// Load the variant's artifacts and cross-validate their shapes.
    pub fn load(settings: &Settings) -> Result<Self> {
        let variant = settings.variant;
        let environment_encoder =
            read_json(settings.join_artifact("env_target_encoder.json"))?;
        let uns_encoder = read_json(settings.join_artifact("uns_encoder.json"))?;
        let temperature_scaler =
            read_json(settings.join_artifact("temperature_scaler.json"))?;
        let reducer: PcaReducer = read_json(settings.join_artifact(variant.reducer_file()))?;
        let forest: ForestClassifier = read_json(settings.join_artifact("classifier.json"))?;
        forest.validate().context("validating classifier artifact")?;
        let text_vectorizer = match variant {
            PipelineVariant::TfidfPca => TextVectorizerArtifact::Tfidf(read_json(
                settings.join_artifact("tfidf_vectorizer.json"),
            )?),
            PipelineVariant::EmbeddingPca => TextVectorizerArtifact::Embedding,
        };

        let set = Self {
            variant,
            environment_encoder,
            uns_encoder,
            temperature_scaler,
            text_vectorizer,
            reducer,
            classifier: Arc::new(forest),
        };
        set.validate().context("validating fitted artifacts")?;
        info!(
            variant = variant.as_str(),
            width = set.classifier.n_features(),
            "loaded fitted artifacts"
        );
        Ok(set)
    }

    /// Assert the explicit schema across artifacts. Shape disagreements
    /// between independently fitted artifacts fail here, at startup,
    /// instead of corrupting predictions silently.
    pub fn validate(&self) -> Result<()> {
        self.reducer.validate()?;
        ensure!(
            self.temperature_scaler.scale != 0.0,
            "temperature scaler has zero scale"
        );
        ensure!(
            !self.environment_encoder.mapping.is_empty(),
            "environment encoder has an empty vocabulary"
        );
        ensure!(
            !self.uns_encoder.classes.is_empty(),
            "uns encoder has an empty vocabulary"
        );

        if let TextVectorizerArtifact::Tfidf(vectorizer) = &self.text_vectorizer {
            vectorizer.validate()?;
            let expected = lexical::COLUMNS.len() + vectorizer.width();
            ensure!(
                self.reducer.input_width() == expected,
                "reducer fitted on {} columns but the variant assembles {}",
                self.reducer.input_width(),
                expected
            );
            let assembled = lexical::COLUMNS
                .iter()
                .map(|name| name.to_string())
                .chain(vectorizer.vocabulary.iter().cloned());
            for (idx, (expected, actual)) in
                assembled.zip(&self.reducer.input_columns).enumerate()
            {
                ensure!(
                    expected == *actual,
                    "reducer input column {idx} is {actual:?} but the variant assembles {expected:?}"
                );
            }
        }

        let composed = PASSTHROUGH_COLUMNS.len() + self.reducer.output_width();
        ensure!(
            self.classifier.n_features() == composed,
            "classifier fitted on {} columns but composition produces {}",
            self.classifier.n_features(),
            composed
        );
        Ok(())
    }

    /// Vectorize the normalized comment with the variant's strategy.
    pub fn vectorize(&self, normalized: &str) -> Result<Vec<f64>, PipelineError> {
        match &self.text_vectorizer {
            TextVectorizerArtifact::Tfidf(vectorizer) => Ok(vectorizer.transform(normalized)),
            TextVectorizerArtifact::Embedding => vectorize::embed(normalized),
        }
    }

    /// Composed-row column layout, in order.
    pub fn composed_columns(&self) -> Vec<String> {
        PASSTHROUGH_COLUMNS
            .iter()
            .map(|name| name.to_string())
            .chain(self.reducer.component_names())
            .collect()
    }
}

fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading fitted artifact {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing fitted artifact {}", path.display()))
}
