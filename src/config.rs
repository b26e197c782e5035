//! Runtime configuration utilities for corrosion-assistant.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::model::artifacts::PipelineVariant;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root folder holding fitted artifact JSON files.
    pub artifacts_dir: PathBuf,
    /// Root folder for prediction outputs.
    pub outputs_dir: PathBuf,
    /// Pipeline variant whose artifacts are loaded at startup.
    pub variant: PipelineVariant,
    /// Groq API keys used round-robin by the advisory generator.
    pub groq_api_keys: Vec<String>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let artifacts_dir = env::var("ARTIFACTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./artifacts"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let variant = env::var("PIPELINE_VARIANT")
            .ok()
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(PipelineVariant::TfidfPca);
        let groq_api_keys = ["GROQ_API_KEY_1", "GROQ_API_KEY_2"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .filter(|value| !value.is_empty())
            .collect();

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            artifacts_dir,
            outputs_dir,
            variant,
            groq_api_keys,
        })
    }

    /// Convenience helper for fitted-artifact paths.
    pub fn join_artifact<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.artifacts_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
