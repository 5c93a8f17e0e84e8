use anivault_config::NotificationConsent;
use anivault_models::ReminderEntry;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::store::{ProfileStore, Slot};

/// How `run` drives due-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCadence {
    /// One pass, then return.
    Startup,
    /// Poll forever at the given period; first pass fires immediately.
    Every(Duration),
}

/// Release reminders keyed on `anime_id`. A reminder fires once when its
/// target time has passed and is pruned in the same breath; notifications
/// only go out when the user granted consent, but pruning happens either way.
pub struct ReminderScheduler {
    store: Arc<ProfileStore>,
    notifier: Arc<dyn Notifier>,
    consent: NotificationConsent,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<ProfileStore>,
        notifier: Arc<dyn Notifier>,
        consent: NotificationConsent,
    ) -> Self {
        Self {
            store,
            notifier,
            consent,
        }
    }

    /// Append a reminder. Setting one for an anime that already has one is a
    /// no-op; returns whether anything was added. A freshly added reminder
    /// gets an immediate confirmation notification so the user can see the
    /// channel works.
    pub fn add(&self, entry: ReminderEntry) -> Result<bool> {
        let mut reminders = self.entries();
        if reminders.iter().any(|r| r.anime_id == entry.anime_id) {
            debug!("Reminder already set for {}", entry.anime_id);
            return Ok(false);
        }

        info!("Reminder set for {} at {}", entry.title, entry.target_date);
        let confirmation = format!("Reminder Set: {}", entry.title);
        reminders.push(entry);
        self.store.save(Slot::Reminders, &reminders)?;

        if self.consent.is_granted() {
            self.notifier
                .notify(&confirmation, "We'll notify you when the new episode is out!");
        }
        Ok(true)
    }

    pub fn remove(&self, anime_id: &str) -> Result<bool> {
        let mut reminders = self.entries();
        let before = reminders.len();
        reminders.retain(|r| r.anime_id != anime_id);
        if reminders.len() == before {
            return Ok(false);
        }

        self.store.save(Slot::Reminders, &reminders)?;
        Ok(true)
    }

    pub fn is_reminded(&self, anime_id: &str) -> bool {
        self.entries().iter().any(|r| r.anime_id == anime_id)
    }

    pub fn entries(&self) -> Vec<ReminderEntry> {
        self.store
            .load::<Vec<ReminderEntry>>(Slot::Reminders)
            .unwrap_or_default()
    }

    pub fn clear(&self) -> Result<()> {
        Ok(self.store.clear(Slot::Reminders)?)
    }

    /// Fire and prune everything due at `now`; returns the fired entries.
    /// Nothing is written when nothing was due.
    pub fn check_due(&self, now: DateTime<Utc>) -> Result<Vec<ReminderEntry>> {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.entries().into_iter().partition(|r| r.is_due(now));
        if due.is_empty() {
            return Ok(Vec::new());
        }

        for reminder in &due {
            info!("Reminder due: {}", reminder.title);
            if self.consent.is_granted() {
                self.notifier.notify(
                    "New Episode Available!",
                    &format!("{} might have a new episode out now!", reminder.title),
                );
            }
        }

        self.store.save(Slot::Reminders, &pending)?;
        Ok(due)
    }

    /// Drive due-checks under `cadence`. `Startup` returns after one pass;
    /// `Every` loops until the surrounding task is dropped.
    pub async fn run(&self, cadence: CheckCadence) -> Result<()> {
        match cadence {
            CheckCadence::Startup => {
                self.check_due(Utc::now())?;
                Ok(())
            }
            CheckCadence::Every(period) => {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    interval.tick().await;
                    if let Err(e) = self.check_due(Utc::now()) {
                        warn!("Reminder check failed: {}", e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anivault_config::PathManager;
    use chrono::{DateTime, TimeZone};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .map(|(t, _)| t.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, body: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn create_scheduler(
        consent: NotificationConsent,
    ) -> (TempDir, ReminderScheduler, Arc<RecordingNotifier>) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let store = Arc::new(ProfileStore::new(&paths).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        let scheduler = ReminderScheduler::new(store, notifier.clone(), consent);
        (dir, scheduler, notifier)
    }

    fn reminder(anime_id: &str, target: DateTime<Utc>) -> ReminderEntry {
        ReminderEntry {
            anime_id: anime_id.to_string(),
            title: format!("Show {}", anime_id),
            target_date: target,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_confirms_when_consent_granted() {
        let (_dir, scheduler, notifier) = create_scheduler(NotificationConsent::Granted);

        assert!(scheduler.add(reminder("a", noon())).unwrap());
        assert_eq!(notifier.titles(), vec!["Reminder Set: Show a"]);
        assert!(scheduler.is_reminded("a"));
    }

    #[test]
    fn test_add_is_idempotent_per_anime() {
        let (_dir, scheduler, notifier) = create_scheduler(NotificationConsent::Granted);

        assert!(scheduler.add(reminder("a", noon())).unwrap());
        assert!(!scheduler.add(reminder("a", noon())).unwrap());

        assert_eq!(scheduler.entries().len(), 1);
        // No second confirmation for the no-op.
        assert_eq!(notifier.titles().len(), 1);
    }

    #[test]
    fn test_add_stays_silent_without_consent() {
        let (_dir, scheduler, notifier) = create_scheduler(NotificationConsent::Denied);

        assert!(scheduler.add(reminder("a", noon())).unwrap());
        assert!(notifier.titles().is_empty());
        // The reminder itself is still stored.
        assert_eq!(scheduler.entries().len(), 1);
    }

    #[test]
    fn test_check_due_fires_and_prunes_only_due() {
        let (_dir, scheduler, notifier) = create_scheduler(NotificationConsent::Granted);

        let now = noon();
        scheduler.add(reminder("past", now - chrono::Duration::hours(1))).unwrap();
        scheduler.add(reminder("exact", now)).unwrap();
        scheduler.add(reminder("future", now + chrono::Duration::hours(1))).unwrap();

        let fired = scheduler.check_due(now).unwrap();
        let fired_ids: Vec<_> = fired.iter().map(|r| r.anime_id.as_str()).collect();
        assert_eq!(fired_ids, vec!["past", "exact"]);

        let remaining = scheduler.entries();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].anime_id, "future");

        let due_titles: Vec<_> = notifier
            .titles()
            .into_iter()
            .filter(|t| t == "New Episode Available!")
            .collect();
        assert_eq!(due_titles.len(), 2);
    }

    #[test]
    fn test_check_due_prunes_even_without_consent() {
        let (_dir, scheduler, notifier) = create_scheduler(NotificationConsent::Denied);

        let now = noon();
        scheduler.add(reminder("past", now - chrono::Duration::minutes(5))).unwrap();

        let fired = scheduler.check_due(now).unwrap();
        assert_eq!(fired.len(), 1);
        assert!(scheduler.entries().is_empty());
        assert!(notifier.titles().is_empty());
    }

    #[test]
    fn test_check_due_with_nothing_due_changes_nothing() {
        let (_dir, scheduler, _notifier) = create_scheduler(NotificationConsent::Granted);

        let now = noon();
        scheduler.add(reminder("future", now + chrono::Duration::days(3))).unwrap();

        assert!(scheduler.check_due(now).unwrap().is_empty());
        assert_eq!(scheduler.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_startup_cadence_runs_one_pass() {
        let (_dir, scheduler, _notifier) = create_scheduler(NotificationConsent::Denied);
        scheduler
            .add(reminder("past", Utc::now() - chrono::Duration::hours(2)))
            .unwrap();

        scheduler.run(CheckCadence::Startup).await.unwrap();
        assert!(scheduler.entries().is_empty());
    }

    #[tokio::test]
    async fn test_periodic_cadence_checks_immediately() {
        let (_dir, scheduler, _notifier) = create_scheduler(NotificationConsent::Denied);
        scheduler
            .add(reminder("past", Utc::now() - chrono::Duration::hours(2)))
            .unwrap();

        // The loop never returns on its own; the first tick is immediate, so
        // a short timeout is enough to observe one pass.
        let run = scheduler.run(CheckCadence::Every(Duration::from_secs(3600)));
        let _ = tokio::time::timeout(Duration::from_millis(250), run).await;

        assert!(scheduler.entries().is_empty());
    }
}
