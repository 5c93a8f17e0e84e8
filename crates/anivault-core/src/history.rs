use anivault_models::HistoryEntry;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::activity::ActivityTracker;
use crate::store::{ProfileStore, Slot};

/// Upper bound on stored history entries; older ones fall off the end.
pub const HISTORY_CAP: usize = 10;

/// One watch event as reported by the player. Durations are in seconds;
/// zero means unknown.
#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub episode_id: String,
    pub title: String,
    pub poster: Option<String>,
    pub watched_duration: u32,
    pub total_duration: u32,
}

/// Most-recently-watched list, newest first. Recording the same episode
/// again refreshes its position and progress rather than duplicating it.
pub struct HistoryLedger {
    store: Arc<ProfileStore>,
    activity: ActivityTracker,
}

impl HistoryLedger {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        let activity = ActivityTracker::new(store.clone());
        Self { store, activity }
    }

    pub fn record(&self, event: WatchEvent) -> Result<Vec<HistoryEntry>> {
        self.record_at(event, Utc::now())
    }

    /// Upsert `event` at the front of the list. The poster survives an
    /// update that arrives without one, so a progress ping cannot blank out
    /// artwork recorded earlier. Every call counts as activity, including
    /// repeat pings for the same episode.
    pub fn record_at(&self, event: WatchEvent, now: DateTime<Utc>) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.entries();

        let existing_poster = entries
            .iter()
            .find(|e| e.episode_id == event.episode_id)
            .and_then(|e| e.poster.clone());
        let poster = event
            .poster
            .filter(|p| !p.is_empty())
            .or(existing_poster);

        entries.retain(|e| e.episode_id != event.episode_id);
        entries.insert(
            0,
            HistoryEntry {
                episode_id: event.episode_id,
                title: event.title,
                poster,
                last_watched_at: now,
                watched_duration: event.watched_duration,
                total_duration: event.total_duration,
            },
        );
        entries.truncate(HISTORY_CAP);

        self.store.save(Slot::History, &entries)?;
        self.activity.bump(now.date_naive());
        Ok(entries)
    }

    /// Returns `false` when no entry matched.
    pub fn remove(&self, episode_id: &str) -> Result<bool> {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.episode_id != episode_id);
        if entries.len() == before {
            debug!("No history entry for {}", episode_id);
            return Ok(false);
        }

        self.store.save(Slot::History, &entries)?;
        Ok(true)
    }

    /// Newest first. Damaged storage reads as empty; the quarantine already
    /// logged the loss.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.store
            .load::<Vec<HistoryEntry>>(Slot::History)
            .unwrap_or_default()
    }

    pub fn clear(&self) -> Result<()> {
        Ok(self.store.clear(Slot::History)?)
    }
}
