//! Request DTOs for the verification service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the verify operation (POST /verify)
///
/// # Fields
/// - `secret`: The plaintext credential to check
/// - `hash`: The password hash to check it against
#[derive(Clone, Deserialize)]
pub struct VerifyRequest {
    /// The plaintext secret
    pub secret: String,
    /// The bcrypt hash
    pub hash: String,
}

impl VerifyRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.secret.is_empty() {
            return Some("Secret cannot be empty".to_string());
        }
        if self.hash.is_empty() {
            return Some("Hash cannot be empty".to_string());
        }
        None
    }
}

// Keeps secrets out of request logs.
impl std::fmt::Debug for VerifyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyRequest")
            .field("secret", &"<redacted>")
            .field("hash", &self.hash)
            .finish()
    }
}
