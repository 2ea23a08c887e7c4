//! Cache Backend Contract
//!
//! The operations every storage backend offers to the verification cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// == Public Constants ==
/// Default time-to-live for cached entries, in seconds
pub const DEFAULT_TTL_SECS: u64 = 600;

// == Cache Backend ==
/// Storage backend with time-to-live semantics.
///
/// A missing key is never an error; `Err` is reserved for genuine backend
/// failures (I/O, protocol, connectivity).
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous entry and
    /// resetting its expiration. Returns whether the write was acknowledged.
    async fn set(&self, key: &str, value: &str) -> Result<bool>;

    /// Removes `key`. Returns `true` iff an entry existed.
    async fn del(&self, key: &str) -> Result<bool>;
}

#[async_trait]
impl<B: CacheBackend + ?Sized> CacheBackend for Arc<B> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<bool> {
        (**self).set(key, value).await
    }

    async fn del(&self, key: &str) -> Result<bool> {
        (**self).del(key).await
    }
}

// == Cache Options ==
/// Options recognised by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Time-to-live for each entry, in seconds
    pub ttl: u64,
    /// Extend an entry's expiration whenever it is read
    pub refresh_ttl: bool,
}

impl CacheOptions {
    /// Returns the TTL as a `Duration`.
    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL_SECS,
            refresh_ttl: true,
        }
    }
}
