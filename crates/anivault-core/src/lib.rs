pub mod activity;
pub mod bookmarks;
pub mod fortune;
pub mod history;
pub mod notify;
pub mod reminders;
pub mod stats;
pub mod store;

pub use activity::ActivityTracker;
pub use bookmarks::BookmarkSet;
pub use fortune::{FortuneDraw, FortuneTeller};
pub use history::{HistoryLedger, WatchEvent, HISTORY_CAP};
pub use notify::{Notifier, SilentNotifier};
pub use reminders::{CheckCadence, ReminderScheduler};
pub use stats::{ProfileStats, WatchLevel, MINUTES_PER_EPISODE};
pub use store::{ProfileStore, Slot, SlotRead, StoreError};
