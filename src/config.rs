//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{CacheOptions, MemoryCacheOptions, DEFAULT_PREFIX};

/// Which cache backend the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Redis,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(format!("Unknown cache backend: {}", other)),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache backend selection
    pub backend: BackendKind,
    /// Redis connection URL, used by the redis backend
    pub redis_url: String,
    /// Key namespace for the redis backend
    pub cache_prefix: String,
    /// Entry time-to-live in seconds
    pub cache_ttl: u64,
    /// Extend an entry's expiration on every read
    pub refresh_ttl: bool,
    /// Memory backend sweep interval in seconds; 0 disables it
    pub prune_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `CACHE_PREFIX` - Redis key prefix (default: bcrypt-cache:)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 600)
    /// - `REFRESH_TTL` - Refresh TTL on read (default: true)
    /// - `PRUNE_INTERVAL` - Memory sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.cache_prefix),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            refresh_ttl: parse_var("REFRESH_TTL").unwrap_or(defaults.refresh_ttl),
            prune_interval: parse_var("PRUNE_INTERVAL").unwrap_or(defaults.prune_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// TTL settings shared by both backends.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            ttl: self.cache_ttl,
            refresh_ttl: self.refresh_ttl,
        }
    }

    /// Settings for the in-process backend.
    pub fn memory_options(&self) -> MemoryCacheOptions {
        MemoryCacheOptions {
            cache: self.cache_options(),
            prune_interval: self.prune_interval,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            cache_prefix: DEFAULT_PREFIX.to_string(),
            cache_ttl: 600,
            refresh_ttl: true,
            prune_interval: 60,
            server_port: 3000,
        }
    }
}
