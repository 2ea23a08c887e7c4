//! Cache Module
//!
//! Storage backends with time-to-live semantics: an in-process cache with a
//! background prune task and a Redis-backed cache.

mod backend;
mod entry;
mod memory;
mod remote;
mod store;


// Re-export public types
pub use backend::{CacheBackend, CacheOptions, DEFAULT_TTL_SECS};
pub use entry::CacheEntry;
pub use memory::{MemoryCache, MemoryCacheOptions, DEFAULT_PRUNE_INTERVAL_SECS};
pub use remote::{RedisCache, RedisCacheBuilder, RemoteStore, DEFAULT_PREFIX};
pub use store::EntryStore;
