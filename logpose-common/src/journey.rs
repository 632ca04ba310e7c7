//! Viewing journey timeline
//!
//! Gaps are derived when the timeline is built and never written back.

use crate::models::JourneyEntry;
use chrono::NaiveDate;
use serde::Serialize;

/// Silences longer than this many days become a gap item
pub const GAP_THRESHOLD_DAYS: i64 = 30;

/// Synthesized marker for a long silence between two entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub start: String,
    pub end: String,
    pub days: i64,
}

/// One item of the rendered timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimelineItem {
    Entry(JourneyEntry),
    Gap(GapEntry),
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Order entries by date and insert gap items between distant neighbours
///
/// Entries whose date does not parse keep their relative order at the end
/// and never produce gaps.
pub fn build_timeline(entries: Vec<JourneyEntry>) -> Vec<TimelineItem> {
    let mut dated: Vec<(Option<NaiveDate>, JourneyEntry)> = entries
        .into_iter()
        .map(|entry| (parse_date(&entry.date), entry))
        .collect();
    dated.sort_by_key(|(date, _)| (date.is_none(), *date));

    let mut timeline = Vec::with_capacity(dated.len());
    let mut previous: Option<(NaiveDate, String)> = None;

    for (date, entry) in dated {
        if let (Some(current), Some((prev_date, prev_label))) = (date, previous.as_ref()) {
            let days = (current - *prev_date).num_days();
            if days > GAP_THRESHOLD_DAYS {
                timeline.push(TimelineItem::Gap(GapEntry {
                    kind: "Gap",
                    start: prev_label.clone(),
                    end: entry.date.clone(),
                    days,
                }));
            }
        }
        previous = date.map(|d| (d, entry.date.clone()));
        timeline.push(TimelineItem::Entry(entry));
    }

    timeline
}
