//! Shared DTOs for JSON requests and responses.

use serde::{Deserialize, Serialize};

use crate::pipeline::compose::RawObservation;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(flatten)]
    pub observation: RawObservation,
    /// Also generate advisory text for the prediction.
    #[serde(default)]
    pub advise: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub severity: String,
    pub class_id: i64,
    pub rate_band: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaResponse {
    pub variant: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialsResponse {
    pub recommendation: String,
}
