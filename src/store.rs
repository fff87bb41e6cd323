//! In-memory menu store mirrored into the local cache slot.
//!
//! The store holds the authoritative list for the current run. Every
//! mutation re-persists the full list, so the cache slot always matches
//! what is in memory (within the 24h expiry window). Items are kept
//! newest-first: stable descending by id.

use std::cmp::Reverse;

use tracing::warn;

use crate::cache::CacheManager;
use crate::models::MenuItem;

pub struct MenuStore {
    items: Vec<MenuItem>,
    cache: CacheManager,
}

impl MenuStore {
    pub fn new(cache: CacheManager) -> Self {
        Self {
            items: Vec::new(),
            cache,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load the cache slot into memory.
    ///
    /// Returns true when a fresh, non-empty list was loaded. Expired,
    /// empty, or undecodable data is treated as absent; the caller falls
    /// back to a fetch.
    pub fn hydrate_from_cache(&mut self) -> bool {
        match self.cache.load_menu() {
            Ok(Some(cached)) if !cached.is_expired() && !cached.data.is_empty() => {
                self.items = cached.data;
                self.sort();
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read menu cache, will refetch");
                false
            }
        }
    }

    /// Replace the whole list. Used by the initial fetch and by
    /// "Restore Data from API"; any local edits are discarded.
    pub fn replace_all(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.sort();
        self.persist();
    }

    /// Add a single item. The caller supplies a freshly minted id, so the
    /// new item sorts to the front.
    pub fn append(&mut self, item: MenuItem) {
        self.items.push(item);
        self.sort();
        self.persist();
    }

    /// Replace the first item whose id matches. No-op if there is no match.
    pub fn update_by_id(&mut self, id: i64, item: MenuItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            *existing = item;
            self.sort();
            self.persist();
        }
    }

    /// Remove the item with the given id. No-op if there is no match.
    pub fn remove_by_id(&mut self, id: i64) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    pub fn cache_age(&self) -> Option<String> {
        self.cache.menu_age()
    }

    fn sort(&mut self) {
        self.items.sort_by_key(|i| Reverse(i.id));
    }

    fn persist(&self) {
        if let Err(e) = self.cache.save_menu(&self.items) {
            warn!(error = %e, "Failed to persist menu to cache");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
