//! HTTP layer exposing the prediction pipeline.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::Settings, model::artifacts::ArtifactSet};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub artifacts: Arc<ArtifactSet>,
}

pub async fn serve(
    settings: Settings,
    artifacts: Arc<ArtifactSet>,
    host: String,
    port: u16,
) -> Result<()> {
    let state = AppState {
        settings,
        artifacts,
    };
    let router = Router::new()
        .route("/health", get(routes::health))
        .route("/schema", get(routes::schema))
        .route("/predict", post(routes::predict))
        .route("/materials", post(routes::materials))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving corrosion-assistant API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
