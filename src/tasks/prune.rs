//! TTL Prune Task
//!
//! Background task that periodically removes expired in-process cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::EntryStore;

/// Spawns a background task that periodically prunes expired entries.
///
/// The task holds only a weak reference to the store, so it winds down on its
/// own once the owning cache is gone. The owner should still abort the
/// returned handle on teardown so the task stops at once instead of at the
/// next tick.
///
/// The first sweep runs one full `interval` after spawning.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(EntryStore::new(ttl, true)));
/// let handle = spawn_prune_task(Arc::downgrade(&store), Duration::from_secs(60));
/// // Later, during teardown:
/// handle.abort();
/// ```
pub fn spawn_prune_task(store: Weak<RwLock<EntryStore>>, interval: Duration) -> JoinHandle<()> {
    let first_sweep = Instant::now() + interval;

    tokio::spawn(async move {
        info!(
            "Starting TTL prune task with interval of {} seconds",
            interval.as_secs_f64()
        );

        let mut ticker = interval_at(first_sweep, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let Some(store) = store.upgrade() else {
                debug!("TTL prune: cache dropped, stopping");
                break;
            };

            let removed = {
                let mut guard = store.write().await;
                guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL prune: removed {} expired entries", removed);
            } else {
                debug!("TTL prune: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(1);

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_task_removes_expired_entries() {
        let store = Arc::new(RwLock::new(EntryStore::new(TTL, true)));
        store
            .write()
            .await
            .set("expire_soon".to_string(), "value".to_string());

        let handle = spawn_prune_task(Arc::downgrade(&store), Duration::from_secs(5));

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;

        assert!(store.read().await.is_empty(), "Expired entry should have been pruned");

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_task_waits_for_first_interval() {
        let store = Arc::new(RwLock::new(EntryStore::new(TTL, true)));
        store
            .write()
            .await
            .set("key".to_string(), "value".to_string());

        let handle = spawn_prune_task(Arc::downgrade(&store), Duration::from_secs(5));

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;

        // Expired but not yet swept
        assert_eq!(store.read().await.len(), 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_task_preserves_valid_entries() {
        let store = Arc::new(RwLock::new(EntryStore::new(Duration::from_secs(3600), true)));
        store
            .write()
            .await
            .set("long_lived".to_string(), "value".to_string());

        let handle = spawn_prune_task(Arc::downgrade(&store), Duration::from_secs(1));

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;

        assert_eq!(
            store.write().await.get("long_lived").as_deref(),
            Some("value"),
            "Valid entry should not be removed"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_prune_task_can_be_aborted() {
        let store = Arc::new(RwLock::new(EntryStore::new(TTL, true)));

        let handle = spawn_prune_task(Arc::downgrade(&store), Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_task_stops_when_store_dropped() {
        let store = Arc::new(RwLock::new(EntryStore::new(TTL, true)));
        let handle = spawn_prune_task(Arc::downgrade(&store), Duration::from_secs(1));

        drop(store);
        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;

        assert!(handle.is_finished());
    }
}
