//! Episode listing, lookup and search

use axum::{
    extract::{Path, Query, State},
    Json,
};
use logpose_common::search;
use logpose_common::EpisodeRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/episodes
///
/// All episode records after the override merge, ascending by number.
pub async fn list_episodes(State(state): State<AppState>) -> ApiResult<Json<Vec<EpisodeRecord>>> {
    let episodes = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::internal("Failed to load episodes", e))?;
    debug!("Returning {} episodes", episodes.len());
    Ok(Json(episodes))
}

/// GET /api/episode-analysis/:id
///
/// Ids that are not episode numbers are simply not found.
pub async fn get_episode_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EpisodeRecord>> {
    let not_found = || ApiError::NotFound("Episode not found".to_string());

    let number: u32 = id.trim().parse().map_err(|_| not_found())?;

    state
        .store
        .find(number)
        .await
        .map_err(|e| ApiError::internal("Internal server error", e))?
        .map(Json)
        .ok_or_else(not_found)
}

/// Query parameters for episode search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub episodes: Vec<u32>,
}

/// GET /api/episodes/search?q=
pub async fn search_episodes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let episodes = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::internal("Failed to load episodes", e))?;

    let hits = search::search_episodes(&episodes, &query.q);
    Ok(Json(SearchResponse {
        query: query.q,
        episodes: hits,
    }))
}
