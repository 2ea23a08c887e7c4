//! Slow hash comparison
//!
//! The expensive check the cache stands in front of. Injected into
//! [`BcryptCache`](crate::BcryptCache) as a strategy so callers and tests can
//! swap the implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::VerifyError;

// == Hash Verifier ==
/// Checks a secret against a password hash.
#[async_trait]
pub trait HashVerifier: Send + Sync {
    /// Returns whether `secret` matches `hash`.
    ///
    /// Errors mean the input was unusable (for example a malformed hash),
    /// not that the secret was wrong.
    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, VerifyError>;
}

#[async_trait]
impl<V: HashVerifier + ?Sized> HashVerifier for Arc<V> {
    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, VerifyError> {
        (**self).verify(secret, hash).await
    }
}

// == Bcrypt Verifier ==
/// bcrypt comparison run on tokio's blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptVerifier;

#[async_trait]
impl HashVerifier for BcryptVerifier {
    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, VerifyError> {
        let secret = secret.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash))
            .await
            .map_err(|e| VerifyError::Task(e.to_string()))?
            .map_err(VerifyError::from)
    }
}
