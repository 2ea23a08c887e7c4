//! Remote TTL Cache
//!
//! Cache backend that keeps entries in Redis and lets Redis expire them.
//!
//! ## Example
//!
//! ```ignore
//! use bcrypt_cache::cache::{CacheOptions, RedisCache};
//!
//! let cache = RedisCache::connect("redis://localhost:6379", CacheOptions::default()).await?;
//! // Or with an existing connection
//! let cache = RedisCache::builder().store(conn).ttl(60).build()?;
//! ```

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::debug;

use crate::cache::{CacheBackend, CacheOptions};
use crate::error::{CacheError, Result};

// == Public Constants ==
/// Namespace prepended to every key by default
pub const DEFAULT_PREFIX: &str = "bcrypt-cache:";

// == Remote Store ==
/// Minimal key-value client the remote backend needs.
///
/// Implementations are cheap to clone; clones share the underlying
/// connection so a refresh can be sent from a detached task.
#[async_trait]
pub trait RemoteStore: Clone + Send + Sync + 'static {
    /// Reads the value at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` at `key` with an expiry of `ttl_secs`, atomically.
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool>;

    /// Deletes `key`, returning the number of keys removed.
    async fn del(&self, key: &str) -> Result<u64>;

    /// Resets the expiry of `key`. Returns false if the key does not exist.
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool>;
}

#[async_trait]
impl RemoteStore for ConnectionManager {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.clone();
        Ok(AsyncCommands::get(&mut conn, key).await?)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool> {
        let mut conn = self.clone();
        AsyncCommands::set_ex::<_, _, ()>(&mut conn, key, value, ttl_secs).await?;
        Ok(true)
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut conn = self.clone();
        Ok(AsyncCommands::del(&mut conn, key).await?)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool> {
        let mut conn = self.clone();
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Ok(AsyncCommands::expire(&mut conn, key, ttl).await?)
    }
}

// == Redis Cache Builder ==
/// Builder for [`RedisCache`]; a store is required.
#[derive(Debug, Clone)]
pub struct RedisCacheBuilder<S> {
    store: Option<S>,
    prefix: String,
    options: CacheOptions,
}

impl<S: RemoteStore> RedisCacheBuilder<S> {
    /// Sets the connected store client.
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the namespace prepended to every key.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the entry lifetime in seconds.
    pub fn ttl(mut self, ttl: u64) -> Self {
        self.options.ttl = ttl;
        self
    }

    /// Enables or disables expiry refresh on read.
    pub fn refresh_ttl(mut self, refresh_ttl: bool) -> Self {
        self.options.refresh_ttl = refresh_ttl;
        self
    }

    /// Replaces TTL and refresh settings at once.
    pub fn options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the cache, failing if no store was supplied.
    pub fn build(self) -> Result<RedisCache<S>> {
        let store = self
            .store
            .ok_or_else(|| CacheError::Config("Missing Redis client reference".to_string()))?;

        Ok(RedisCache {
            store,
            prefix: self.prefix,
            options: self.options,
        })
    }
}

// == Redis Cache ==
/// Cache backend storing entries in Redis under a key prefix.
///
/// When refresh is enabled, `get` sends `EXPIRE` from a detached task and
/// does not wait for it. That refresh can interleave with a concurrent `del`
/// or `set` from another caller: refreshing a deleted key is a no-op, and a
/// refresh landing after a concurrent `set` extends the new entry's lifetime.
/// Both outcomes are accepted.
#[derive(Debug, Clone)]
pub struct RedisCache<S = ConnectionManager> {
    store: S,
    prefix: String,
    options: CacheOptions,
}

impl RedisCache<ConnectionManager> {
    // == Connect ==
    /// Opens a managed connection to `url` and builds a cache on it.
    pub async fn connect(url: &str, options: CacheOptions) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| CacheError::Config(format!("Invalid Redis URL: {}", e)))?;
        let conn = client.get_connection_manager().await?;

        Self::builder().store(conn).options(options).build()
    }
}

impl<S: RemoteStore> RedisCache<S> {
    /// Starts a builder with default prefix and options.
    pub fn builder() -> RedisCacheBuilder<S> {
        RedisCacheBuilder {
            store: None,
            prefix: DEFAULT_PREFIX.to_string(),
            options: CacheOptions::default(),
        }
    }

    /// Returns the configured key prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl<S: RemoteStore> CacheBackend for RedisCache<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = self.key(key);
        let value = self.store.get(&key).await?;

        if self.options.refresh_ttl {
            let store = self.store.clone();
            let ttl = self.options.ttl;
            tokio::spawn(async move {
                if let Err(e) = store.expire(&key, ttl).await {
                    debug!("Failed to refresh expiry for {}: {}", key, e);
                }
            });
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<bool> {
        self.store
            .set_ex(&self.key(key), value, self.options.ttl)
            .await
    }

    async fn del(&self, key: &str) -> Result<bool> {
        Ok(self.store.del(&self.key(key)).await? > 0)
    }
}
