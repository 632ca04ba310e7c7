//! Progress grid classification

use crate::models::ProgressRecord;
use serde::Serialize;

/// How far an episode has been consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Watched,
    Read,
    Summary,
    Unwatched,
}

/// Per-status tallies over the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub watched: u32,
    pub read: u32,
    pub summary: u32,
    pub unwatched: u32,
}

/// Status of every episode from 1 to `total`
#[derive(Debug, Clone, Serialize)]
pub struct ProgressGrid {
    pub total: u32,
    pub counts: StatusCounts,
    /// `statuses[i]` is the status of episode `i + 1`
    pub statuses: Vec<EpisodeStatus>,
}

impl ProgressRecord {
    /// Watched wins over read, read over summary
    pub fn status_of(&self, episode: u32) -> EpisodeStatus {
        if self.watched.contains(&episode) {
            EpisodeStatus::Watched
        } else if self.read.iter().any(|r| r.contains(episode)) {
            EpisodeStatus::Read
        } else if self.summaries.iter().any(|r| r.contains(episode)) {
            EpisodeStatus::Summary
        } else {
            EpisodeStatus::Unwatched
        }
    }

    pub fn grid(&self, total: u32) -> ProgressGrid {
        let mut counts = StatusCounts::default();
        let statuses: Vec<EpisodeStatus> = (1..=total)
            .map(|episode| {
                let status = self.status_of(episode);
                match status {
                    EpisodeStatus::Watched => counts.watched += 1,
                    EpisodeStatus::Read => counts.read += 1,
                    EpisodeStatus::Summary => counts.summary += 1,
                    EpisodeStatus::Unwatched => counts.unwatched += 1,
                }
                status
            })
            .collect();

        ProgressGrid {
            total,
            counts,
            statuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EpisodeRange;

    fn progress() -> ProgressRecord {
        ProgressRecord {
            watched: vec![1, 2, 5],
            summaries: vec![EpisodeRange { start: 3, end: 8 }],
            read: vec![EpisodeRange { start: 5, end: 6 }],
        }
    }

    #[test]
    fn test_status_priority() {
        let p = progress();
        assert_eq!(p.status_of(1), EpisodeStatus::Watched);
        // 5 is watched, read and summarized
        assert_eq!(p.status_of(5), EpisodeStatus::Watched);
        // 6 is read and summarized
        assert_eq!(p.status_of(6), EpisodeStatus::Read);
        assert_eq!(p.status_of(7), EpisodeStatus::Summary);
        assert_eq!(p.status_of(9), EpisodeStatus::Unwatched);
    }

    #[test]
    fn test_grid_counts() {
        let grid = progress().grid(10);
        assert_eq!(grid.statuses.len(), 10);
        assert_eq!(
            grid.counts,
            StatusCounts {
                watched: 3,
                read: 1,
                summary: 4,
                unwatched: 2,
            }
        );
        assert_eq!(grid.statuses[0], EpisodeStatus::Watched);
        assert_eq!(grid.statuses[9], EpisodeStatus::Unwatched);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(EpisodeStatus::Summary).unwrap(),
            serde_json::json!("summary")
        );
    }

    #[test]
    fn test_empty_record_all_unwatched() {
        let grid = ProgressRecord::default().grid(1136);
        assert_eq!(grid.counts.unwatched, 1136);
    }
}
