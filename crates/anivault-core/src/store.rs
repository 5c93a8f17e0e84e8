use anivault_config::PathManager;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Writing can fail; reading never does (see [`SlotRead`]).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access profile storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode {slot} slot: {source}")]
    Encode {
        slot: Slot,
        source: serde_json::Error,
    },
}

/// The named storage slots of a profile. Each slot is one JSON file under
/// the profile directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    History,
    Bookmarks,
    Reminders,
    Activity,
    Fortune,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::History,
        Slot::Bookmarks,
        Slot::Reminders,
        Slot::Activity,
        Slot::Fortune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::History => "history",
            Slot::Bookmarks => "bookmarks",
            Slot::Reminders => "reminders",
            Slot::Activity => "activity",
            Slot::Fortune => "fortune",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::History => "history.json",
            Slot::Bookmarks => "bookmarks.json",
            Slot::Reminders => "reminders.json",
            Slot::Activity => "activity.json",
            Slot::Fortune => "fortune.json",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of reading a slot. `Damaged` means the file was there but could
/// not be used. Unparseable content is quarantined, so the next read comes
/// back `Absent`; a file the store cannot read at all stays in place and
/// keeps reading `Damaged`. Callers pick their own fallback but can tell
/// the difference.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotRead<T> {
    Value(T),
    Absent,
    Damaged,
}

impl<T> SlotRead<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            SlotRead::Value(value) => Some(value),
            SlotRead::Absent | SlotRead::Damaged => None,
        }
    }

    pub fn is_damaged(&self) -> bool {
        matches!(self, SlotRead::Damaged)
    }
}

impl<T: Default> SlotRead<T> {
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

type Observer = Box<dyn Fn(Slot) + Send + Sync>;

/// Process-wide profile storage. Reads never fail: a missing file is
/// `Absent` and an unparseable one is quarantined and reported `Damaged`.
/// Writes go through a temp file and rename so a crash mid-write cannot
/// leave a half-written slot behind.
pub struct ProfileStore {
    profile_dir: PathBuf,
    damaged_dir: PathBuf,
    observers: Mutex<Vec<Observer>>,
}

impl ProfileStore {
    pub fn new(paths: &PathManager) -> Result<Self, StoreError> {
        let profile_dir = paths.profile_dir();
        std::fs::create_dir_all(&profile_dir)?;

        Ok(Self {
            profile_dir,
            damaged_dir: paths.damaged_dir(),
            observers: Mutex::new(Vec::new()),
        })
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.profile_dir.join(slot.file_name())
    }

    pub fn exists(&self, slot: Slot) -> bool {
        self.slot_path(slot).exists()
    }

    /// Register an observer called after every successful write or clear of
    /// a slot. Observers run on the writing thread and must not write back
    /// to the store.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(Slot) + Send + Sync + 'static,
    {
        self.observers.lock().unwrap().push(Box::new(observer));
    }

    fn notify(&self, slot: Slot) {
        for observer in self.observers.lock().unwrap().iter() {
            observer(slot);
        }
    }

    pub fn load<T: DeserializeOwned>(&self, slot: Slot) -> SlotRead<T> {
        let path = self.slot_path(slot);

        if !path.exists() {
            debug!("Slot miss: {} (file does not exist)", slot);
            return SlotRead::Absent;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(value) => {
                    debug!("Slot hit: {}", slot);
                    SlotRead::Value(value)
                }
                Err(e) => {
                    warn!("Slot corruption detected for {}: {}. Quarantining file.", slot, e);
                    self.quarantine(slot, &path);
                    SlotRead::Damaged
                }
            },
            Err(e) => {
                warn!("Failed to read slot file for {}: {}", slot, e);
                SlotRead::Damaged
            }
        }
    }

    fn quarantine(&self, slot: Slot, path: &Path) {
        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        let target = self.damaged_dir.join(format!("{}-{}.json", slot.name(), stamp));

        let moved = std::fs::create_dir_all(&self.damaged_dir)
            .and_then(|_| std::fs::rename(path, &target));
        match moved {
            Ok(()) => warn!("Quarantined damaged {} slot to {:?}", slot, target),
            Err(e) => {
                warn!("Failed to quarantine damaged {} slot: {}. Deleting instead.", slot, e);
                if let Err(rm_err) = std::fs::remove_file(path) {
                    warn!("Failed to delete damaged slot file: {}", rm_err);
                }
            }
        }
    }

    pub fn save<T: Serialize>(&self, slot: Slot, value: &T) -> Result<(), StoreError> {
        let path = self.slot_path(slot);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Encode { slot, source })?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &path)?;

        debug!("Slot saved: {}", slot);
        self.notify(slot);
        Ok(())
    }

    /// Delete a slot file. Absent slots are left alone and observers are
    /// only told when something actually changed.
    pub fn clear(&self, slot: Slot) -> Result<(), StoreError> {
        let path = self.slot_path(slot);
        if path.exists() {
            std::fs::remove_file(&path)?;
            info!("Cleared {} slot", slot);
            self.notify(slot);
        }
        Ok(())
    }

    pub fn clear_all(&self) -> Result<(), StoreError> {
        for slot in Slot::ALL {
            self.clear(slot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_store() -> (TempDir, ProfileStore) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let store = ProfileStore::new(&paths).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_slot_reads_absent() {
        let (_dir, store) = create_store();
        assert_eq!(store.load::<Vec<String>>(Slot::History), SlotRead::Absent);
        assert!(!store.exists(Slot::History));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = create_store();
        let items = vec!["one".to_string(), "two".to_string()];

        store.save(Slot::Bookmarks, &items).unwrap();

        assert!(store.exists(Slot::Bookmarks));
        assert_eq!(
            store.load::<Vec<String>>(Slot::Bookmarks),
            SlotRead::Value(items)
        );
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (dir, store) = create_store();
        store.save(Slot::History, &vec!["x".to_string()]).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("data").join("profile"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
    }

    #[test]
    fn test_damaged_slot_is_quarantined() {
        let (dir, store) = create_store();
        let path = dir.path().join("data").join("profile").join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let first = store.load::<Vec<String>>(Slot::History);
        assert!(first.is_damaged());
        assert!(!path.exists(), "damaged file should be moved out of the profile");

        let quarantined: Vec<_> = std::fs::read_dir(dir.path().join("data").join("damaged"))
            .unwrap()
            .collect();
        assert_eq!(quarantined.len(), 1);

        // Quarantine happens once; the slot now reads as missing.
        assert_eq!(store.load::<Vec<String>>(Slot::History), SlotRead::Absent);
    }

    #[test]
    fn test_unreadable_slot_is_damaged_but_not_quarantined() {
        let (dir, store) = create_store();
        // A directory where the file should be makes the read itself fail.
        let path = dir.path().join("data").join("profile").join("history.json");
        std::fs::create_dir(&path).unwrap();

        assert!(store.load::<Vec<String>>(Slot::History).is_damaged());
        assert!(path.exists(), "unreadable file should stay in place");
        assert!(store.load::<Vec<String>>(Slot::History).is_damaged());
    }

    #[test]
    fn test_wrong_shape_counts_as_damaged() {
        let (_dir, store) = create_store();
        store.save(Slot::Activity, &vec![1, 2, 3]).unwrap();

        // Valid JSON, wrong type for the reader.
        let read = store.load::<std::collections::BTreeMap<String, u32>>(Slot::Activity);
        assert!(read.is_damaged());
    }

    #[test]
    fn test_observers_fire_on_save_and_clear() {
        let (_dir, store) = create_store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        store.subscribe(move |slot| sink.lock().unwrap().push(slot));

        store.save(Slot::Reminders, &Vec::<String>::new()).unwrap();
        store.clear(Slot::Reminders).unwrap();
        // Clearing an absent slot is a no-op and stays silent.
        store.clear(Slot::Fortune).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Slot::Reminders, Slot::Reminders]);
    }

    #[test]
    fn test_clear_all_removes_every_slot() {
        let (_dir, store) = create_store();
        for slot in Slot::ALL {
            store.save(slot, &vec!["data".to_string()]).unwrap();
        }

        store.clear_all().unwrap();

        for slot in Slot::ALL {
            assert!(!store.exists(slot));
        }
    }
}
