//! bcrypt_cache - Cached bcrypt verification
//!
//! Remembers successful password-hash comparisons in an in-memory or Redis
//! TTL cache, storing a digest of the secret rather than the secret itself.

pub mod api;
pub mod bcrypt_cache;
pub mod cache;
pub mod config;
pub mod digest;
pub mod error;
pub mod models;
pub mod stats;
pub mod tasks;
pub mod verifier;

pub use api::AppState;
pub use bcrypt_cache::BcryptCache;
pub use cache::{CacheBackend, MemoryCache, RedisCache};
pub use config::Config;
pub use verifier::{BcryptVerifier, HashVerifier};
