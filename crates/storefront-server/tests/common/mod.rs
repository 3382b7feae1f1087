//! Shared helpers for router-level tests
//!
//! The app is built over a lazy pool that never connects, so only requests
//! that are answered before touching the database can be exercised here.
//! Audit records land in an in-memory sink.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

use storefront_server::{
    api,
    audit::{AuditRecorder, MemoryAuditSink},
    auth::SessionKeys,
    config::Config,
    state::AppState,
};

pub struct TestApp {
    pub router: Router,
    pub keys: SessionKeys,
    pub sink: Arc<MemoryAuditSink>,
}

impl TestApp {
    /// A bearer header carrying a valid session for `uid`.
    pub fn bearer(&self, uid: i64, email: &str) -> String {
        format!("Bearer {}", self.keys.issue(uid, email).unwrap())
    }
}

pub fn test_app() -> TestApp {
    test_app_with_sink(Arc::new(MemoryAuditSink::new()))
}

/// Same app, recording into the given sink.
pub fn test_app_with_sink(sink: Arc<MemoryAuditSink>) -> TestApp {
    let config = Config::default();
    let keys = SessionKeys::new(&config.session);

    let db = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    let state = AppState {
        db,
        recorder: AuditRecorder::new(sink.clone(), keys.clone()),
        sessions: keys.clone(),
    };

    TestApp {
        router: api::create_router(state, &config),
        keys,
        sink,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
