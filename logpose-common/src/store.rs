//! File-backed episode store
//!
//! Episode records live as one YAML file per episode under the episode
//! directory. An optional override subdirectory holds records that replace
//! the top-level ones. Four source tiers are merged, highest first:
//!
//! 1. override files whose name contains `-analysis`
//! 2. other override files
//! 3. top-level files whose name contains `-analysis`
//! 4. other top-level files
//!
//! Inside a tier files are visited in file-name order and the first record
//! seen for an episode number is kept. Unreadable or malformed files are
//! logged and skipped.

use crate::config::Config;
use crate::models::EpisodeRecord;
use crate::{yaml, Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EPISODE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "md"];
const ANALYSIS_MARKER: &str = "-analysis";

/// Where a record came from, ordered from highest to lowest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceTier {
    OverrideAnalysis,
    OverridePlain,
    TopLevelAnalysis,
    TopLevelPlain,
}

/// Read-only view over the episode directory
#[derive(Debug, Clone)]
pub struct EpisodeStore {
    episode_dir: PathBuf,
    override_dir: PathBuf,
}

impl EpisodeStore {
    pub fn new(episode_dir: impl Into<PathBuf>, override_name: &str) -> Self {
        let episode_dir = episode_dir.into();
        let override_dir = episode_dir.join(override_name);
        Self {
            episode_dir,
            override_dir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.episode_dir(), &config.override_dir)
    }

    pub fn episode_dir(&self) -> &Path {
        &self.episode_dir
    }

    /// All merged episode records, ascending by episode number
    ///
    /// # Errors
    ///
    /// Fails only when the top-level episode directory cannot be listed.
    pub async fn list(&self) -> Result<Vec<EpisodeRecord>> {
        Ok(self.scan().await?.into_values().collect())
    }

    /// The winning record for one episode number
    pub async fn find(&self, number: u32) -> Result<Option<EpisodeRecord>> {
        Ok(self.scan().await?.remove(&number))
    }

    async fn scan(&self) -> Result<BTreeMap<u32, EpisodeRecord>> {
        let top_level = candidate_files(&self.episode_dir)
            .await
            .map_err(|e| Error::io(&self.episode_dir, e))?;

        let overrides = match candidate_files(&self.override_dir).await {
            Ok(files) => files,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(Error::io(&self.override_dir, e)),
        };

        let (override_analysis, override_plain): (Vec<_>, Vec<_>) =
            overrides.into_iter().partition(|p| is_analysis_file(p));
        let (top_analysis, top_plain): (Vec<_>, Vec<_>) =
            top_level.into_iter().partition(|p| is_analysis_file(p));

        let tiers = [
            (SourceTier::OverrideAnalysis, override_analysis),
            (SourceTier::OverridePlain, override_plain),
            (SourceTier::TopLevelAnalysis, top_analysis),
            (SourceTier::TopLevelPlain, top_plain),
        ];

        let mut merged = BTreeMap::new();
        for (tier, files) in tiers {
            for path in files {
                let Some(record) = load_record(&path).await else {
                    continue;
                };
                let Some(number) = record.number() else {
                    warn!("Skipping {}: no episode or id field", path.display());
                    continue;
                };
                if merged.contains_key(&number) {
                    debug!(
                        "Episode {} in {} ({:?}) shadowed by a higher-priority record",
                        number,
                        path.display(),
                        tier
                    );
                    continue;
                }
                merged.insert(number, record);
            }
        }

        debug!(
            "Merged {} episodes from {}",
            merged.len(),
            self.episode_dir.display()
        );
        Ok(merged)
    }
}

/// Load a single record, logging and swallowing failures
async fn load_record(path: &Path) -> Option<EpisodeRecord> {
    match yaml::load_file::<EpisodeRecord>(path).await {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Error parsing {}: {}", path.display(), e);
            None
        }
    }
}

/// Episode files directly inside `dir`, sorted by file name
///
/// Symlinks are followed; dangling ones are skipped.
async fn candidate_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !has_episode_extension(&path) {
            continue;
        }
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_episode_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EPISODE_EXTENSIONS.contains(&ext))
}

fn is_analysis_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(ANALYSIS_MARKER))
}
