//! Cache Entry Module
//!
//! Defines the structure for individual in-process cache entries.

use std::time::Duration;

use tokio::time::Instant;

/// Roughly 30 years, used when `now + ttl` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Returns `now + ttl`, capped at a far-future deadline on overflow.
fn deadline(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl).unwrap_or(now + FAR_FUTURE)
}

// == Cache Entry ==
/// A single cached value with its expiration deadline.
///
/// Deadlines use tokio's clock so that paused-time tests can drive expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Point in time after which the entry is dead
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: deadline(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time passes its deadline.
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }

    // == Refresh ==
    /// Pushes the deadline out to `ttl` from now.
    pub fn refresh(&mut self, ttl: Duration) {
        self.expires_at = deadline(ttl);
    }

    // == Time To Live ==
    /// Returns the time left before expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
