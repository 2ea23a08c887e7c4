//! Response DTOs for the verification service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::stats::VerifyStats;

/// Response body for the verify operation (POST /verify)
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    /// Whether the secret matched the hash
    pub valid: bool,
}

impl VerifyResponse {
    /// Creates a new VerifyResponse
    pub fn new(valid: bool) -> Self {
        Self { valid }
    }
}

/// Response body for cache invalidation (DELETE /cache/*hash)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// The hash whose cached outcome was targeted
    pub hash: String,
    /// Whether a cached entry existed and was removed
    pub removed: bool,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(hash: impl Into<String>, removed: bool) -> Self {
        Self {
            hash: hash.into(),
            removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Comparisons answered from the cache
    pub cache_hits: u64,
    /// Comparisons that found nothing cached
    pub cache_misses: u64,
    /// Absorbed backend failures
    pub backend_errors: u64,
    /// Slow comparisons performed
    pub slow_compares: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<VerifyStats> for StatsResponse {
    fn from(stats: VerifyStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            backend_errors: stats.backend_errors,
            slow_compares: stats.slow_compares,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_response_serialize() {
        let json = serde_json::to_string(&VerifyResponse::new(true)).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new("$2a$10$abc", false);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("$2a$10$abc"));
        assert!(json.contains(r#""removed":false"#));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = VerifyStats {
            cache_hits: 80,
            cache_misses: 20,
            backend_errors: 1,
            slow_compares: 20,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.backend_errors, 1);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(VerifyStats::new());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
