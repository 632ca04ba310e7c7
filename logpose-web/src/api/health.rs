//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Whether the episode directory exists under the content root
    pub episodes_available: bool,
}

/// GET /health
///
/// Always 200 while the process is serving; `status` drops to "degraded"
/// when there is no episode directory to read.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let episodes_available = tokio::fs::metadata(state.store.episode_dir())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    Json(HealthResponse {
        status: if episodes_available { "ok" } else { "degraded" },
        module: "logpose-web",
        version: env!("CARGO_PKG_VERSION"),
        episodes_available,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
