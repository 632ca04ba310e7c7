//! Journal data models
//!
//! All records are read from hand-edited YAML and returned as JSON. Fields
//! the models do not name are carried through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One analyzed episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode number as written by analysis files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,

    /// Episode number as written by plain episode files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "one_or_many")]
    pub synopsis: Vec<String>,

    /// Comma-joined character names
    #[serde(default)]
    pub focal_points: String,

    #[serde(default)]
    pub pivotal_beats: Vec<PivotalBeat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_development: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_building: Option<Vec<String>>,

    /// Anything else in the file (air_date, description, content, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EpisodeRecord {
    /// Identity of the record: `episode`, falling back to `id`
    pub fn number(&self) -> Option<u32> {
        self.episode.or(self.id)
    }
}

/// A narrative moment with what was said, why it matters, and its subtext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotalBeat {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub what_was_said: String,
    #[serde(default)]
    pub why_this_matters: String,
    #[serde(default)]
    pub subtext: String,
}

/// Kind of item in the viewing journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JourneyKind {
    Episode,
    Summary,
    Manga,
    Game,
    Note,
}

/// A dated entry in the personal viewing journey
///
/// Keys beyond the known ones are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyEntry {
    #[serde(rename = "type")]
    pub kind: JourneyKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO `YYYY-MM-DD`; kept as written
    pub date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Inclusive episode range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRange {
    pub start: u32,
    pub end: u32,
}

impl EpisodeRange {
    pub fn contains(&self, episode: u32) -> bool {
        episode >= self.start && episode <= self.end
    }
}

/// Which episodes have been watched, read, or covered by summaries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub watched: Vec<u32>,
    #[serde(default)]
    pub summaries: Vec<EpisodeRange>,
    #[serde(default)]
    pub read: Vec<EpisodeRange>,
}

/// Accept either a single string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
