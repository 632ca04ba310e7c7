//! Text search across episode records

use crate::models::EpisodeRecord;

/// Episode numbers whose text contains `query`, case-insensitively
///
/// Title, synopsis, focal points, and every pivotal beat field are searched.
/// A blank query matches nothing.
pub fn search_episodes(episodes: &[EpisodeRecord], query: &str) -> Vec<u32> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<u32> = episodes
        .iter()
        .filter(|episode| matches(episode, &needle))
        .filter_map(EpisodeRecord::number)
        .collect();
    hits.sort_unstable();
    hits.dedup();
    hits
}

fn matches(episode: &EpisodeRecord, needle: &str) -> bool {
    let contains = |text: &String| text.to_lowercase().contains(needle);

    contains(&episode.title)
        || episode.synopsis.iter().any(contains)
        || contains(&episode.focal_points)
        || episode.pivotal_beats.iter().any(|beat| {
            contains(&beat.title)
                || contains(&beat.what_was_said)
                || contains(&beat.why_this_matters)
                || contains(&beat.subtext)
        })
}
