//! Health routes
//!
//! - `GET /api/health` - process is up
//! - `GET /api/health/db` - runs `SELECT 1` against the pool
//! - `GET /api/test` - alias of `/api/health`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/db", get(database_health))
}

/// # Response
///
/// `200 OK` - `{"ok": true, "db": "up"}`
pub async fn liveness() -> impl IntoResponse {
    Json(json!({ "ok": true, "db": "up" }))
}

/// # Response
///
/// - `200 OK` - `{"ok": true, "db": 1}`
/// - `500 Internal Server Error` - `{"ok": false, "message": "..."}`
#[tracing::instrument(skip(pool))]
async fn database_health(State(pool): State<PgPool>) -> Response {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(value) => Json(json!({ "ok": true, "db": value })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "message": e.to_string() })),
            )
                .into_response()
        },
    }
}
