//! Integration tests for the middleware stack
//!
//! These tests verify:
//! - CORS answers preflights for configured origins with credentials
//! - Unknown origins get no CORS headers
//! - Oversized bodies are rejected
//! - Compressed responses still carry CORS headers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

use common::test_app;

#[tokio::test]
async fn test_preflight_for_configured_origin() {
    let response = test_app()
        .router
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/brands")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"));
}

#[tokio::test]
async fn test_unknown_origin_gets_no_allow_origin() {
    let response = test_app()
        .router
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_body_limit() {
    let app = test_app();
    let oversized = format!(r#"{{"name":"{}"}}"#, "x".repeat(11 * 1024 * 1024));

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(oversized))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_compressed_response_keeps_cors_headers() {
    let response = test_app()
        .router
        .oneshot(
            Request::builder()
                .uri("/api/auth/__ping")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCEPT_ENCODING, "gzip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
}
