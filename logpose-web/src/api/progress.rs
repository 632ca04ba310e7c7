//! Progress endpoints

use axum::{extract::State, Json};
use logpose_common::progress::ProgressGrid;
use logpose_common::{yaml, ProgressRecord};

use super::{ApiError, ApiResult};
use crate::AppState;

async fn load_progress(state: &AppState) -> ApiResult<ProgressRecord> {
    yaml::load_file(&state.config.progress_path())
        .await
        .map_err(|e| ApiError::internal("Failed to load progress data", e))
}

/// GET /api/progress
pub async fn get_progress(State(state): State<AppState>) -> ApiResult<Json<ProgressRecord>> {
    Ok(Json(load_progress(&state).await?))
}

/// GET /api/progress/grid
///
/// Status of every episode up to the configured total.
pub async fn get_progress_grid(State(state): State<AppState>) -> ApiResult<Json<ProgressGrid>> {
    let progress = load_progress(&state).await?;
    Ok(Json(progress.grid(state.config.total_episodes)))
}
