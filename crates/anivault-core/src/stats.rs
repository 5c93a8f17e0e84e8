use anivault_models::{ActivityLog, BookmarkEntry, HistoryEntry, ReminderEntry};

use crate::store::{ProfileStore, Slot};

/// Catalog episodes mostly run ~24 minutes; good enough for a vanity stat.
pub const MINUTES_PER_EPISODE: u64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchLevel {
    Newbie,
    AnimeWatcher,
    Otaku,
    WeebLord,
}

impl WatchLevel {
    pub fn label(&self) -> &'static str {
        match self {
            WatchLevel::Newbie => "Newbie",
            WatchLevel::AnimeWatcher => "Anime Watcher",
            WatchLevel::Otaku => "Otaku",
            WatchLevel::WeebLord => "Weeb Lord",
        }
    }
}

/// Snapshot across all slots. `lifetime_episodes` comes from the activity
/// log rather than the history list; history is capped and would stall the
/// level ladder at its cap.
#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub lifetime_episodes: u64,
    pub active_days: usize,
    pub recent_history: usize,
    pub bookmark_count: usize,
    pub reminder_count: usize,
    pub level: WatchLevel,
    pub next_level_at: u64,
    pub progress_percent: f32,
}

impl ProfileStats {
    pub fn collect(store: &ProfileStore) -> Self {
        let activity = store.load::<ActivityLog>(Slot::Activity).unwrap_or_default();
        let history = store
            .load::<Vec<HistoryEntry>>(Slot::History)
            .unwrap_or_default();
        let bookmarks = store
            .load::<Vec<BookmarkEntry>>(Slot::Bookmarks)
            .unwrap_or_default();
        let reminders = store
            .load::<Vec<ReminderEntry>>(Slot::Reminders)
            .unwrap_or_default();

        let lifetime_episodes = activity.total();
        let (level, next_level_at, progress_percent) = level_for(lifetime_episodes);

        Self {
            lifetime_episodes,
            active_days: activity.active_days(),
            recent_history: history.len(),
            bookmark_count: bookmarks.len(),
            reminder_count: reminders.len(),
            level,
            next_level_at,
            progress_percent,
        }
    }

    pub fn time_watched(&self) -> String {
        let total_minutes = self.lifetime_episodes * MINUTES_PER_EPISODE;
        format!("{}h {}m", total_minutes / 60, total_minutes % 60)
    }
}

fn level_for(episodes: u64) -> (WatchLevel, u64, f32) {
    let (level, next_at, progress) = if episodes >= 100 {
        (WatchLevel::WeebLord, 500, 100.0)
    } else if episodes >= 50 {
        (WatchLevel::Otaku, 100, (episodes - 50) as f32 / 50.0 * 100.0)
    } else if episodes >= 10 {
        (WatchLevel::AnimeWatcher, 50, (episodes - 10) as f32 / 40.0 * 100.0)
    } else {
        (WatchLevel::Newbie, 10, episodes as f32 / 10.0 * 100.0)
    };
    (level, next_at, progress.min(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anivault_config::PathManager;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_store() -> (TempDir, Arc<ProfileStore>) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let store = Arc::new(ProfileStore::new(&paths).unwrap());
        (dir, store)
    }

    #[test]
    fn test_level_ladder_boundaries() {
        assert_eq!(level_for(0).0, WatchLevel::Newbie);
        assert_eq!(level_for(9).0, WatchLevel::Newbie);
        assert_eq!(level_for(10).0, WatchLevel::AnimeWatcher);
        assert_eq!(level_for(49).0, WatchLevel::AnimeWatcher);
        assert_eq!(level_for(50).0, WatchLevel::Otaku);
        assert_eq!(level_for(99).0, WatchLevel::Otaku);
        assert_eq!(level_for(100).0, WatchLevel::WeebLord);

        assert_eq!(level_for(0).1, 10);
        assert_eq!(level_for(10).1, 50);
        assert_eq!(level_for(50).1, 100);
        assert_eq!(level_for(100).1, 500);
    }

    #[test]
    fn test_progress_within_bands() {
        assert_eq!(level_for(5).2, 50.0);
        assert_eq!(level_for(30).2, 50.0);
        assert_eq!(level_for(75).2, 50.0);
        assert_eq!(level_for(100).2, 100.0);
    }

    #[test]
    fn test_collect_on_empty_profile() {
        let (_dir, store) = create_store();
        let stats = ProfileStats::collect(&store);

        assert_eq!(stats.lifetime_episodes, 0);
        assert_eq!(stats.level, WatchLevel::Newbie);
        assert_eq!(stats.progress_percent, 0.0);
        assert_eq!(stats.time_watched(), "0h 0m");
    }

    #[test]
    fn test_collect_reads_activity_not_history_length() {
        let (_dir, store) = create_store();

        let mut activity = ActivityLog::new();
        let day = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        for offset in 0..12 {
            let d = day + chrono::Duration::days(offset % 4);
            activity.bump(d);
        }
        store.save(Slot::Activity, &activity).unwrap();
        // History holds only a couple of capped entries.
        store
            .save(Slot::History, &Vec::<HistoryEntry>::new())
            .unwrap();

        let stats = ProfileStats::collect(&store);
        assert_eq!(stats.lifetime_episodes, 12);
        assert_eq!(stats.active_days, 4);
        assert_eq!(stats.recent_history, 0);
        assert_eq!(stats.level, WatchLevel::AnimeWatcher);
        assert_eq!(stats.time_watched(), "4h 48m");
    }
}
