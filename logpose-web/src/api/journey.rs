//! Viewing journey endpoints

use axum::{extract::State, Json};
use logpose_common::journey::{build_timeline, TimelineItem};
use logpose_common::{yaml, JourneyEntry};

use super::{ApiError, ApiResult};
use crate::AppState;

async fn load_entries(state: &AppState) -> ApiResult<Vec<JourneyEntry>> {
    yaml::load_file(&state.config.journey_path())
        .await
        .map_err(|e| ApiError::internal("Failed to load journey data", e))
}

/// GET /api/journey
///
/// Entries exactly as stored; no gap items.
pub async fn get_journey(State(state): State<AppState>) -> ApiResult<Json<Vec<JourneyEntry>>> {
    Ok(Json(load_entries(&state).await?))
}

/// GET /api/journey/timeline
///
/// Entries in date order with a `Gap` item wherever more than 30 days pass.
pub async fn get_journey_timeline(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TimelineItem>>> {
    let entries = load_entries(&state).await?;
    Ok(Json(build_timeline(entries)))
}
