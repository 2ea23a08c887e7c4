//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint against real bcrypt.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bcrypt_cache::cache::{CacheOptions, MemoryCache};
use bcrypt_cache::{api::create_router, AppState, CacheBackend};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN_HASH: &str = "$2a$10$o4ezyhBv1b2tOQmHH1kiO.vdeIPLQQcY.1aCtH9VODTK.1/CpyRPa";

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<MemoryCache>) {
    let backend = Arc::new(MemoryCache::without_pruning(CacheOptions::default()));
    let state = AppState::with_backend(backend.clone());
    (create_router(state), backend)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn verify_request(secret: &str, hash: &str) -> Request<Body> {
    let body = serde_json::json!({ "secret": secret, "hash": hash }).to_string();
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == Verify Endpoint Tests ==

#[tokio::test]
async fn test_verify_endpoint_success() {
    let (app, backend) = create_test_app();

    let response = app
        .oneshot(verify_request("token", TOKEN_HASH))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["valid"], Value::Bool(true));

    let cached = backend.get(TOKEN_HASH).await.unwrap().unwrap();
    assert_ne!(cached, "token", "Secret must not be cached in plaintext");
}

#[tokio::test]
async fn test_verify_endpoint_wrong_secret() {
    let (app, backend) = create_test_app();

    let response = app
        .oneshot(verify_request("token123", TOKEN_HASH))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["valid"], Value::Bool(false));
    assert!(backend.is_empty().await);
}

#[tokio::test]
async fn test_verify_endpoint_malformed_hash() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(verify_request("token", "not-a-bcrypt-hash"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_verify_endpoint_empty_secret() {
    let (app, _) = create_test_app();

    let response = app.oneshot(verify_request("", TOKEN_HASH)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Secret"));
}

#[tokio::test]
async fn test_verify_endpoint_invalid_json() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/verify")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Cache Interaction Tests ==

#[tokio::test]
async fn test_repeat_verify_served_from_cache() {
    let (app, _) = create_test_app();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(verify_request("token", TOKEN_HASH))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["slow_compares"], 1);
    assert_eq!(json["cache_hits"], 2);
    assert_eq!(json["cache_misses"], 1);
}

#[tokio::test]
async fn test_invalidate_endpoint() {
    let (app, backend) = create_test_app();

    app.clone()
        .oneshot(verify_request("token", TOKEN_HASH))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/cache/{}", TOKEN_HASH))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"], Value::Bool(true));
    assert_eq!(json["hash"].as_str().unwrap(), TOKEN_HASH);
    assert!(backend.get(TOKEN_HASH).await.unwrap().is_none());
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_endpoint_initial() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get_request("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache_hits"], 0);
    assert_eq!(json["cache_misses"], 0);
    assert_eq!(json["hit_rate"], 0.0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get_request("/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
