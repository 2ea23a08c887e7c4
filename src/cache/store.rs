//! Entry Store Module
//!
//! HashMap storage with per-entry TTL bookkeeping, shared by the in-process
//! backend and its prune task.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheEntry;

// == Entry Store ==
/// Key-value storage where every entry carries an expiration deadline.
#[derive(Debug)]
pub struct EntryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lifetime given to new and refreshed entries
    ttl: Duration,
    /// Whether reads extend an entry's deadline
    refresh_ttl: bool,
}

impl EntryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new(ttl: Duration, refresh_ttl: bool) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            refresh_ttl,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry and resetting its TTL.
    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, CacheEntry::new(value, self.ttl));
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed on sight, whether or not a prune task is
    /// running. Live entries have their deadline extended when refresh is on.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let entry = self.entries.get_mut(key)?;

        if entry.is_expired() {
            self.entries.remove(key);
            return None;
        }

        if self.refresh_ttl {
            entry.refresh(self.ttl);
        }
        Some(entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key, returning whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
