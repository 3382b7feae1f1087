//! End-to-end flows against a real database
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_server::{
    api,
    audit::{AuditRecorder, MemoryAuditSink},
    auth::SessionKeys,
    config::Config,
    state::AppState,
};

fn app(pool: PgPool) -> (Router, SessionKeys, Arc<MemoryAuditSink>) {
    let config = Config::default();
    let keys = SessionKeys::new(&config.session);
    let sink = Arc::new(MemoryAuditSink::new());
    let state = AppState {
        db: pool,
        recorder: AuditRecorder::new(sink.clone(), keys.clone()),
        sessions: keys.clone(),
    };
    (api::create_router(state, &config), keys, sink)
}

async fn send(router: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        },
        None => Body::empty(),
    };

    let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn settle(sink: &MemoryAuditSink, expected: usize) {
    for _ in 0..200 {
        if sink.len() >= expected {
            return;
        }
        tokio::task::yield_now().await;
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_register_then_manage_brands(pool: PgPool) {
    let (router, keys, sink) = app(pool);

    let (status, body) = send(
        &router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Giulia", "email": "Giulia@Shop.it", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "giulia@shop.it");
    let uid = body["user"]["id"].as_i64().unwrap();
    let token = keys.issue(uid, "giulia@shop.it").unwrap();

    let (status, brand) = send(
        &router,
        "POST",
        "/api/brands",
        Some(&token),
        Some(json!({ "name": "Landini", "slug": "landini" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let brand_id = brand["id"].as_i64().unwrap();

    let (status, _) = send(
        &router,
        "POST",
        "/api/brands",
        Some(&token),
        Some(json!({ "name": "Landini bis", "slug": "landini" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(
        &router,
        "PATCH",
        &format!("/api/brands/{brand_id}"),
        Some(&token),
        Some(json!({ "name": "Landini Spa" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Landini Spa");

    let (status, _) = send(&router, "DELETE", &format!("/api/brands/{brand_id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    settle(&sink, 4).await;
    let actions: Vec<String> = sink.entries().into_iter().map(|e| e.action).collect();
    assert_eq!(actions, vec!["REGISTER", "CREATE", "UPDATE", "DELETE"]);
    assert!(sink.entries().iter().skip(1).all(|e| e.user_id == Some(uid)));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_tractor_stock_is_separate_per_table(pool: PgPool) {
    let (router, keys, sink) = app(pool);
    let token = keys.issue(1, "admin@shop.it").unwrap();

    let (status, created) = send(
        &router,
        "POST",
        "/api/trattori/usati",
        Some(&token),
        Some(json!({ "name": "Same Explorer", "price": "12,50", "quantity": "3" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price_cents"], 1250);
    assert_eq!(created["quantity"], 3);

    let (_, used) = send(&router, "GET", "/api/trattori/usati?q=explorer", None, None).await;
    assert_eq!(used["total"], 1);
    let (_, new) = send(&router, "GET", "/api/trattori/nuovi", None, None).await;
    assert_eq!(new["total"], 0);
    assert_eq!(new["pages"], 1);

    let id = created["id"].as_i64().unwrap();
    let (status, _) = send(&router, "GET", &format!("/api/trattori/nuovi/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        "PATCH",
        &format!("/api/trattori/usati/{id}"),
        Some(&token),
        Some(json!({ "colour": "red" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    settle(&sink, 1).await;
    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity, "trattori_usati");
}
