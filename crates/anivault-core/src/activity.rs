use anivault_models::ActivityLog;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::warn;

use crate::store::{ProfileStore, Slot, SlotRead};

/// Contribution-graph counter. Days are keyed on the UTC calendar date so
/// the graph matches the history timestamps it is derived from.
#[derive(Clone)]
pub struct ActivityTracker {
    store: Arc<ProfileStore>,
}

impl ActivityTracker {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self { store }
    }

    /// Increment the counter for `day`. This rides on the watch flow, so
    /// failures are logged and swallowed instead of propagated.
    pub fn bump(&self, day: NaiveDate) {
        let mut log = self.snapshot();
        log.bump(day);
        if let Err(e) = self.store.save(Slot::Activity, &log) {
            warn!("Failed to persist activity log: {}", e);
        }
    }

    /// Current log; a damaged slot starts over empty.
    pub fn snapshot(&self) -> ActivityLog {
        match self.store.load::<ActivityLog>(Slot::Activity) {
            SlotRead::Value(log) => log,
            SlotRead::Absent => ActivityLog::new(),
            SlotRead::Damaged => {
                warn!("Activity log was damaged; starting over empty");
                ActivityLog::new()
            }
        }
    }
}
