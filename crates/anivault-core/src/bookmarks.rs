use anivault_models::BookmarkEntry;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::store::{ProfileStore, Slot};

/// The "my list" collection. Unordered set semantics on `anime_id`, stored
/// newest first.
pub struct BookmarkSet {
    store: Arc<ProfileStore>,
}

impl BookmarkSet {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self { store }
    }

    /// Insert at the front. Adding an id that is already present is a no-op
    /// and keeps the original entry, timestamp included; returns whether
    /// anything was added.
    pub fn add(&self, entry: BookmarkEntry) -> Result<bool> {
        let mut bookmarks = self.entries();
        if bookmarks.iter().any(|b| b.anime_id == entry.anime_id) {
            debug!("Already bookmarked: {}", entry.anime_id);
            return Ok(false);
        }

        bookmarks.insert(0, entry);
        self.store.save(Slot::Bookmarks, &bookmarks)?;
        Ok(true)
    }

    pub fn remove(&self, anime_id: &str) -> Result<bool> {
        let mut bookmarks = self.entries();
        let before = bookmarks.len();
        bookmarks.retain(|b| b.anime_id != anime_id);
        if bookmarks.len() == before {
            return Ok(false);
        }

        self.store.save(Slot::Bookmarks, &bookmarks)?;
        Ok(true)
    }

    pub fn is_bookmarked(&self, anime_id: &str) -> bool {
        self.entries().iter().any(|b| b.anime_id == anime_id)
    }

    pub fn entries(&self) -> Vec<BookmarkEntry> {
        self.store
            .load::<Vec<BookmarkEntry>>(Slot::Bookmarks)
            .unwrap_or_default()
    }

    pub fn clear(&self) -> Result<()> {
        Ok(self.store.clear(Slot::Bookmarks)?)
    }
}
