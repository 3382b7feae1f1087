//! Router-level tests for routing, session guards and request validation
//!
//! These tests verify:
//! - Health probes and the auth ping answer without a database
//! - Every write route rejects requests without a valid session
//! - Validation errors are reported before any database access
//! - Rejected requests leave no audit record
//! - A failing audit store does not change the response

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use storefront_server::audit::MemoryAuditSink;
use tower::ServiceExt;

mod common;

use common::{body_json, json_request, test_app, test_app_with_sink};

#[tokio::test]
async fn test_health_and_test_alias() {
    for uri in ["/api/health", "/api/test"] {
        let response = test_app()
            .router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true, "db": "up" }));
    }
}

#[tokio::test]
async fn test_auth_ping() {
    let response = test_app()
        .router
        .oneshot(Request::builder().uri("/api/auth/__ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["scope"], "auth");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = test_app()
        .router
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}

#[tokio::test]
async fn test_guarded_routes_require_a_session() {
    let guarded = [
        ("POST", "/api/brands"),
        ("PATCH", "/api/brands/1"),
        ("DELETE", "/api/categories/1"),
        ("POST", "/api/products"),
        ("DELETE", "/api/products/3"),
        ("POST", "/api/services"),
        ("PATCH", "/api/blog/2"),
        ("POST", "/api/trattori/nuovi"),
        ("DELETE", "/api/trattori/usati/4"),
        ("POST", "/api/admins/register"),
        ("GET", "/api/users"),
        ("GET", "/api/users/1"),
        ("GET", "/api/audit"),
    ];

    for (method, uri) in guarded {
        let app = test_app();
        let response = app
            .router
            .oneshot(json_request(method, uri, json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body_json(response).await["error"], "Not authenticated");
        assert!(app.sink.is_empty());
    }
}

#[tokio::test]
async fn test_invalid_session_is_rejected() {
    let mut request = json_request("POST", "/api/brands", json!({ "name": "Fendt" }));
    request
        .headers_mut()
        .insert(header::COOKIE, "auth_token=forged.token.value".parse().unwrap());

    let response = test_app().router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Session expired or invalid");
}

#[tokio::test]
async fn test_write_validation_runs_before_the_database() {
    let cases = [
        ("/api/brands", json!({ "name": "Fendt" }), "slug required"),
        ("/api/categories", json!({ "slug": "trattori" }), "name_it, name_en required"),
        ("/api/products", json!({ "title_it": "Senza slug" }), "slug required"),
        ("/api/trattori/usati", json!({ "price": "12,50" }), "name is required"),
    ];

    for (uri, body, message) in cases {
        let app = test_app();
        let mut request = json_request("POST", uri, body);
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, app.bearer(1, "admin@shop.it").parse().unwrap());

        let response = app.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["error"], message);
        assert!(app.sink.is_empty());
    }
}

#[tokio::test]
async fn test_register_validation() {
    let response = test_app()
        .router
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Mario", "email": "not-an-email", "password": "lungapassword" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid email address");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let response = test_app()
        .router
        .oneshot(json_request("POST", "/api/auth/login", json!({ "email": "a@b.it" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Email and password are required");
}

#[tokio::test]
async fn test_me_without_session() {
    let response = test_app()
        .router
        .oneshot(Request::builder().uri("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Not authenticated");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_is_audited() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .header(header::AUTHORIZATION, app.bearer(5, "staff@shop.it"))
        .header(header::USER_AGENT, "api-tests")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("auth_token=;"));
    assert_eq!(body_json(response).await, json!({ "ok": true }));

    // The record is written on a detached task.
    for _ in 0..100 {
        if !app.sink.is_empty() {
            break;
        }
        tokio::task::yield_now().await;
    }
    let entries = app.sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "LOGOUT");
    assert_eq!(entries[0].entity, "auth");
    assert_eq!(entries[0].user_id, Some(5));
    assert_eq!(entries[0].user_agent.as_deref(), Some("api-tests"));
}

#[tokio::test]
async fn test_logout_succeeds_when_audit_store_fails() {
    let app = test_app_with_sink(Arc::new(MemoryAuditSink::failing()));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .header(header::AUTHORIZATION, app.bearer(5, "staff@shop.it"))
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));

    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(app.sink.is_empty());
}
