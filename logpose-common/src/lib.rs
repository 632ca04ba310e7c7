//! # Log Pose Common Library
//!
//! Shared code for the Log Pose journal service and its tools:
//! - Episode, journey and progress models
//! - File-backed episode store with tiered override merge
//! - Configuration loading
//! - Mega-prompt template generator
//! - Search, journey timeline and progress grid helpers

pub mod config;
pub mod error;
pub mod journey;
pub mod mega_prompt;
pub mod models;
pub mod progress;
pub mod search;
pub mod store;
pub mod yaml;

pub use error::{Error, Result};
pub use models::{EpisodeRecord, JourneyEntry, PivotalBeat, ProgressRecord};
pub use store::EpisodeStore;
