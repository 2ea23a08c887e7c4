//! Error types for the verification cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Errors raised by cache backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend was constructed with missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage failure (I/O, protocol, connectivity)
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == Verify Error Enum ==
/// Errors raised by the slow hash comparison.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The hash could not be parsed or the secret was rejected by the hasher
    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    /// The blocking comparison task panicked or was cancelled
    #[error("Comparison task failed: {0}")]
    Task(String),
}

impl From<bcrypt::BcryptError> for VerifyError {
    fn from(err: bcrypt::BcryptError) -> Self {
        VerifyError::InvalidHash(err.to_string())
    }
}

// == Api Error Enum ==
/// Errors surfaced by the HTTP service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Verify(VerifyError::InvalidHash(_)) => StatusCode::BAD_REQUEST,
            ApiError::Verify(VerifyError::Task(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Cache(CacheError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Cache(CacheError::Backend(_)) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache backend operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_error_maps_to_bad_request() {
        let err = ApiError::from(VerifyError::InvalidHash("bad".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_backend_error_maps_to_unavailable() {
        let err = ApiError::from(CacheError::Backend("Connection closed".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_bcrypt_error_converts_to_invalid_hash() {
        let err: VerifyError = bcrypt::verify("token", "nope").unwrap_err().into();
        assert!(matches!(err, VerifyError::InvalidHash(_)));
    }
}
