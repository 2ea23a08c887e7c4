//! Secret digests stored in place of the secret itself.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Signature of a fast, deterministic digest function.
pub type DigestFn = fn(&str) -> String;

/// Base64-encoded SHA-256 of `secret`.
pub fn sha256_digest(secret: &str) -> String {
    STANDARD.encode(Sha256::digest(secret.as_bytes()))
}
