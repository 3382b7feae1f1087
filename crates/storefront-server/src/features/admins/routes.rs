//! Admin API routes (session required)
//!
//! - `POST /api/admins/register` - create an administrator

use axum::{extract::State, routing::post, Json, Router};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{register, AdminCreated, RegisterAdminCommand};
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::state::AppState;

pub fn admins_routes(sessions: SessionKeys) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_admin))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session))
}

/// # Response
///
/// - `200 OK` - `{"id", "name", "email", "createdAt"}`
/// - `400 Bad Request` - a field is missing
/// - `409 Conflict` - email already registered
#[tracing::instrument(skip_all)]
async fn register_admin(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<RegisterAdminCommand>,
) -> AppResult<Json<AdminCreated>> {
    let admin = register::handle(&pool, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, ResourceType::Admins).meta(json!({
            "adminId": admin.id,
            "name": admin.name,
            "email": admin.email,
        })),
    );

    Ok(Json(admin))
}
