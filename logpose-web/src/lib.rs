//! logpose-web library - episode journal HTTP service
//!
//! Read-only JSON API over the YAML episode, journey and progress files
//! under the content root, plus the mega-prompt generator.

use std::sync::Arc;

use axum::Router;
use logpose_common::config::Config;
use logpose_common::EpisodeStore;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration (read-only)
    pub config: Arc<Config>,
    /// Episode directory reader
    pub store: EpisodeStore,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        let store = EpisodeStore::from_config(&config);
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

/// Build application router
///
/// Unmatched paths fall through to static files under `<root>/public`.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let public_dir = state.config.public_dir();

    let api = Router::new()
        .route("/api/episodes", get(api::list_episodes))
        .route("/api/episodes/search", get(api::search_episodes))
        .route("/api/episode-analysis/:id", get(api::get_episode_analysis))
        .route("/api/journey", get(api::get_journey))
        .route("/api/journey/timeline", get(api::get_journey_timeline))
        .route("/api/progress", get(api::get_progress))
        .route("/api/progress/grid", get(api::get_progress_grid))
        .route("/api/mega-prompt", post(api::run_mega_prompt))
        .route("/api/buildinfo", get(api::get_build_info));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
