//! HTTP API handlers for logpose-web

pub mod buildinfo;
pub mod episodes;
pub mod error;
pub mod health;
pub mod journey;
pub mod mega_prompt;
pub mod progress;

pub use buildinfo::get_build_info;
pub use episodes::{get_episode_analysis, list_episodes, search_episodes};
pub use error::{ApiError, ApiResult};
pub use health::health_routes;
pub use journey::{get_journey, get_journey_timeline};
pub use mega_prompt::run_mega_prompt;
pub use progress::{get_progress, get_progress_grid};
