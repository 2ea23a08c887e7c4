//! In-Process TTL Cache
//!
//! Keeps entries in local memory and owns a background task that sweeps out
//! expired entries.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheBackend, CacheOptions, EntryStore};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_prune_task;

// == Public Constants ==
/// Default interval between sweeps, in seconds
pub const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 60;

// == Memory Cache Options ==
/// Configuration for [`MemoryCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCacheOptions {
    /// Options shared with every backend
    pub cache: CacheOptions,
    /// Seconds between sweeps; 0 disables the prune task
    pub prune_interval: u64,
}

impl Default for MemoryCacheOptions {
    fn default() -> Self {
        Self {
            cache: CacheOptions::default(),
            prune_interval: DEFAULT_PRUNE_INTERVAL_SECS,
        }
    }
}

// == Memory Cache ==
/// Cache backend storing entries in process memory.
///
/// Reads never return an expired entry, even when pruning is disabled; the
/// prune task only reclaims memory held by entries nobody reads again.
#[derive(Debug)]
pub struct MemoryCache {
    store: Arc<RwLock<EntryStore>>,
    prune_handle: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates a cache and, when `prune_interval > 0`, starts its prune task.
    ///
    /// Starting the prune task requires a tokio runtime; calling this outside
    /// one with pruning enabled is a configuration error.
    pub fn new(options: MemoryCacheOptions) -> Result<Self> {
        let store = Arc::new(RwLock::new(EntryStore::new(
            options.cache.ttl_duration(),
            options.cache.refresh_ttl,
        )));

        let prune_handle = if options.prune_interval > 0 {
            if Handle::try_current().is_err() {
                return Err(CacheError::Config(
                    "Memory cache pruning requires a running tokio runtime".to_string(),
                ));
            }
            Some(spawn_prune_task(
                Arc::downgrade(&store),
                Duration::from_secs(options.prune_interval),
            ))
        } else {
            None
        };

        Ok(Self {
            store,
            prune_handle: Mutex::new(prune_handle),
        })
    }

    // == Without Pruning ==
    /// Creates a cache with the given TTL settings and no prune task.
    pub fn without_pruning(cache: CacheOptions) -> Self {
        Self {
            store: Arc::new(RwLock::new(EntryStore::new(
                cache.ttl_duration(),
                cache.refresh_ttl,
            ))),
            prune_handle: Mutex::new(None),
        }
    }

    // == Prune ==
    /// Runs one sweep immediately, returning the number of entries removed.
    pub async fn prune(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    // == Stop Pruning ==
    /// Stops the prune task. Reads still honour expiry afterwards.
    pub fn stop_pruning(&self) {
        if let Some(handle) = self.prune_slot().take() {
            handle.abort();
            debug!("Memory cache prune task stopped");
        }
    }

    // == Is Pruning ==
    /// Returns true while the prune task is running.
    pub fn is_pruning(&self) -> bool {
        self.prune_slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet
    /// swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    fn prune_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.prune_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for MemoryCache {
    fn drop(&mut self) {
        self.stop_pruning();
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<bool> {
        self.store
            .write()
            .await
            .set(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn del(&self, key: &str) -> Result<bool> {
        Ok(self.store.write().await.delete(key))
    }
}
