use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved anime. Display fields are denormalized copies taken at bookmark
/// time because the upstream catalog is not guaranteed reachable later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkEntry {
    pub anime_id: String,
    pub title: String,
    pub poster: String,
    pub score: String, // Upstream reports scores as strings ("8.5")
    pub status: String, // "Ongoing" / "Completed" as reported upstream
    pub added_at: DateTime<Utc>,
}
