//! HTTP route handlers for Axum.

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::{
    advisory::{self, MaterialQuery},
    api::types::{MaterialsResponse, PredictRequest, PredictResponse, SchemaResponse},
    error::PipelineError,
    pipeline,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn schema(State(state): State<AppState>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        variant: state.artifacts.variant.as_str().to_string(),
        columns: state.artifacts.composed_columns(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> ApiResult<PredictResponse> {
    let result = pipeline::predict(&state.artifacts, &request.observation)
        .map_err(map_pipeline_error)?;
    let advisory = if request.advise {
        Some(advisory::advise(&state.settings, &request.observation, &result).await)
    } else {
        None
    };
    Ok(Json(PredictResponse {
        severity: result.severity.to_string(),
        class_id: result.class_id,
        rate_band: result.severity.rate_band().to_string(),
        advisory,
    }))
}

pub async fn materials(
    State(state): State<AppState>,
    Json(query): Json<MaterialQuery>,
) -> Json<MaterialsResponse> {
    let recommendation = advisory::recommend_materials(&state.settings, &query).await;
    Json(MaterialsResponse { recommendation })
}

fn map_pipeline_error(err: PipelineError) -> (StatusCode, String) {
    if err.is_internal() {
        error!(error = %err, "pipeline internal failure");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal pipeline failure".to_string(),
        )
    } else {
        (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}
