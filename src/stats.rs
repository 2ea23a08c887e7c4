//! Verification Statistics Module
//!
//! Tracks how often the verification cache avoided the slow comparison.

use serde::Serialize;

// == Verify Stats ==
/// Counters kept by [`BcryptCache`](crate::BcryptCache).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyStats {
    /// Comparisons answered from a cached digest
    pub cache_hits: u64,
    /// Comparisons that found nothing cached
    pub cache_misses: u64,
    /// Backend reads or writes that failed and were absorbed
    pub backend_errors: u64,
    /// Comparisons that ran the slow hash check
    pub slow_compares: u64,
}

impl VerifyStats {
    // == Constructor ==
    /// Creates a new VerifyStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.cache_misses += 1;
    }

    pub fn record_backend_error(&mut self) {
        self.backend_errors += 1;
    }

    pub fn record_slow_compare(&mut self) {
        self.slow_compares += 1;
    }
}
