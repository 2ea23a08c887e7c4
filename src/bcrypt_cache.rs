//! Verification Cache
//!
//! Remembers successful hash comparisons by storing a digest of the secret
//! under the hash, so repeat checks of the same credential skip the slow
//! comparison. The secret itself never reaches the backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::cache::CacheBackend;
use crate::digest::{sha256_digest, DigestFn};
use crate::error::{CacheError, VerifyError};
use crate::stats::VerifyStats;
use crate::verifier::{BcryptVerifier, HashVerifier};

// == Bcrypt Cache ==
/// Hash comparison backed by a cache of previous successes.
///
/// The cache only ever speeds things up: a failing backend degrades to the
/// slow comparison and `compare` returns the same answer it would without
/// any cache.
pub struct BcryptCache<B, V = BcryptVerifier> {
    backend: B,
    verifier: V,
    digest: DigestFn,
    stats: Mutex<VerifyStats>,
}

impl<B: CacheBackend> BcryptCache<B> {
    // == Constructor ==
    /// Creates a verification cache using bcrypt for the slow comparison.
    pub fn new(backend: B) -> Self {
        Self::with_verifier(backend, BcryptVerifier)
    }
}

impl<B: CacheBackend, V: HashVerifier> BcryptCache<B, V> {
    /// Creates a verification cache with a custom slow comparison.
    pub fn with_verifier(backend: B, verifier: V) -> Self {
        Self {
            backend,
            verifier,
            digest: sha256_digest,
            stats: Mutex::new(VerifyStats::new()),
        }
    }

    /// Replaces the digest stored in place of secrets.
    pub fn with_digest(mut self, digest: DigestFn) -> Self {
        self.digest = digest;
        self
    }

    /// Returns the underlying cache backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // == Compare ==
    /// Checks `secret` against `hash`, consulting the cache first.
    ///
    /// A cached digest settles the answer without the slow comparison. On a
    /// miss or backend failure the slow comparison decides, and a success is
    /// written back. Only errors from the slow comparison reach the caller.
    pub async fn compare(&self, secret: &str, hash: &str) -> Result<bool, VerifyError> {
        match self.backend.get(hash).await {
            // An empty value is never a digest, so it falls through to a miss
            Ok(Some(cached)) if !cached.is_empty() => {
                self.stats().record_hit();
                return Ok(cached == (self.digest)(secret));
            }
            Ok(_) => self.stats().record_miss(),
            Err(e) => {
                warn!("Failed to read from cache, falling back to slow compare: {}", e);
                self.stats().record_backend_error();
            }
        }

        self.stats().record_slow_compare();
        let valid = self.verifier.verify(secret, hash).await?;

        if valid {
            debug!("Add to cache: {}", hash);
            if let Err(e) = self.backend.set(hash, &(self.digest)(secret)).await {
                warn!("Failed to write to cache: {}", e);
                self.stats().record_backend_error();
            }
        }

        Ok(valid)
    }

    // == Invalidate ==
    /// Forgets any cached outcome for `hash`, for use when a credential is
    /// rotated or revoked. Returns whether an entry was removed.
    pub async fn invalidate(&self, hash: &str) -> Result<bool, CacheError> {
        let removed = self.backend.del(hash).await?;
        debug!("Invalidate {}: removed={}", hash, removed);
        Ok(removed)
    }

    // == Stats ==
    /// Returns a snapshot of the verification counters.
    pub fn snapshot(&self) -> VerifyStats {
        self.stats().clone()
    }

    fn stats(&self) -> MutexGuard<'_, VerifyStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
