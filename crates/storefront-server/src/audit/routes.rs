//! Audit trail API
//!
//! - `GET /api/audit?action&entity&userId&limit&offset` - newest entries first

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;

use super::models::{AuditLogItem, AuditQuery};
use super::queries::query_audit_log;
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLogItem>,
    pub total: i64,
}

pub fn audit_routes(sessions: SessionKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_audit_log))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session))
}

#[tracing::instrument(skip(pool), fields(action = ?query.action, entity = ?query.entity))]
async fn list_audit_log(
    State(pool): State<PgPool>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditLogPage>> {
    let (entries, total) = query_audit_log(&pool, &query).await?;

    Ok(Json(AuditLogPage {
        items: entries.into_iter().map(AuditLogItem::from).collect(),
        total,
    }))
}
