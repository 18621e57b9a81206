use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One ballot row: the on-chain tuple, optionally enriched with metadata
/// fetched from the REST service. Built fresh on every page load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u32,

    pub name: String,

    pub party: String,

    #[serde(rename = "voteCount")]
    pub vote_count: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Voting start/end as seconds since epoch, stored on-chain and mutated only
/// through the authorized setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionWindow {
    pub start: i64,
    pub end: i64,
}

impl ElectionWindow {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.start, 0).single()
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.end, 0).single()
    }

    /// Display form, e.g. `01/06/2026 - 15/06/2026`.
    pub fn display(&self) -> String {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => format!(
                "{} - {}",
                start.format("%d/%m/%Y"),
                end.format("%d/%m/%Y")
            ),
            _ => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_display_formats_both_dates() {
        let window = ElectionWindow {
            start: 1_717_200_000, // 2024-06-01
            end: 1_718_409_600,   // 2024-06-15
        };
        assert_eq!(window.display(), "01/06/2024 - 15/06/2024");
    }
}
