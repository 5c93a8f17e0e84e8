use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recently-watched episode in the history ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub episode_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>, // Display copy; kept when a later update omits one
    pub last_watched_at: DateTime<Utc>,
    #[serde(default)]
    pub watched_duration: u32, // Seconds
    #[serde(default)]
    pub total_duration: u32, // Seconds
}

impl HistoryEntry {
    /// Fraction watched in [0, 1]; 0 when the total is unknown.
    pub fn progress(&self) -> f32 {
        if self.total_duration == 0 {
            return 0.0;
        }
        (self.watched_duration as f32 / self.total_duration as f32).min(1.0)
    }
}
