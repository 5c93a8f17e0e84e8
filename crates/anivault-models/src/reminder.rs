use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending release reminder: notify once when `target_date` has passed,
/// then drop the entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderEntry {
    pub anime_id: String,
    pub title: String,
    pub target_date: DateTime<Utc>,
}

impl ReminderEntry {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.target_date <= now
    }
}
