//! API Handlers
//!
//! HTTP request handlers for each verification service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheBackend, MemoryCache, RedisCache};
use crate::config::{BackendKind, Config};
use crate::error::{ApiError, CacheError};
use crate::models::{
    HealthResponse, InvalidateResponse, StatsResponse, VerifyRequest, VerifyResponse,
};
use crate::verifier::{BcryptVerifier, HashVerifier};
use crate::BcryptCache;

/// Verification cache over type-erased backend and verifier.
pub type SharedBcryptCache = BcryptCache<Arc<dyn CacheBackend>, Arc<dyn HashVerifier>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Verification cache
    pub cache: Arc<SharedBcryptCache>,
}

impl AppState {
    /// Creates a new AppState from a backend and a slow comparison.
    pub fn new(backend: Arc<dyn CacheBackend>, verifier: Arc<dyn HashVerifier>) -> Self {
        Self {
            cache: Arc::new(BcryptCache::with_verifier(backend, verifier)),
        }
    }

    /// Creates a new AppState that verifies with bcrypt.
    pub fn with_backend(backend: Arc<dyn CacheBackend>) -> Self {
        Self::new(backend, Arc::new(BcryptVerifier))
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects to Redis when the redis backend is selected.
    pub async fn from_config(config: &Config) -> Result<Self, CacheError> {
        let backend: Arc<dyn CacheBackend> = match config.backend {
            BackendKind::Memory => Arc::new(MemoryCache::new(config.memory_options())?),
            BackendKind::Redis => {
                let cache = RedisCache::connect(&config.redis_url, config.cache_options()).await?;
                Arc::new(cache)
            }
        };
        info!("Cache backend initialized: {:?}", config.backend);

        Ok(Self::with_backend(backend))
    }
}

/// Handler for POST /verify
///
/// Checks a secret against a hash through the verification cache.
pub async fn verify_handler(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let valid = state.cache.compare(&req.secret, &req.hash).await?;

    Ok(Json(VerifyResponse::new(valid)))
}

/// Handler for DELETE /cache/*hash
///
/// Drops the cached outcome for a hash.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<InvalidateResponse>, ApiError> {
    let removed = state.cache.invalidate(&hash).await?;

    Ok(Json(InvalidateResponse::new(hash, removed)))
}

/// Handler for GET /stats
///
/// Returns current verification statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.snapshot()))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
