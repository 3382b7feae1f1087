//! Service API routes
//!
//! - `GET /api/services?q&status&page` - 12 per page, newest first
//! - `POST /api/services` - create (session required)
//! - `PATCH /api/services/:id` - partial update (session required)
//! - `DELETE /api/services/:id` - delete (session required)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{create, delete, update, CreateServiceCommand, UpdateServiceCommand};
use super::queries::{list, ListServicesQuery};
use super::types::Service;
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::features::shared::pagination::ListPage;
use crate::state::AppState;

pub fn services_routes(sessions: SessionKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_service))
        .route("/:id", patch(update_service).delete(delete_service))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session));

    Router::new().route("/", get(list_services)).merge(protected)
}

#[tracing::instrument(skip(pool))]
async fn list_services(
    State(pool): State<PgPool>,
    Query(query): Query<ListServicesQuery>,
) -> AppResult<Json<ListPage<Service>>> {
    Ok(Json(list::handle(&pool, query).await?))
}

/// # Response
///
/// - `201 Created` - the service
/// - `400 Bad Request` - `slug`, `title_it` or `content_it` missing
/// - `409 Conflict` - slug already in use
#[tracing::instrument(skip_all)]
async fn create_service(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<CreateServiceCommand>,
) -> AppResult<(StatusCode, Json<Service>)> {
    let service = create::handle(&pool, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, ResourceType::Services).meta(json!({
            "serviceId": service.id,
            "slug": service.slug,
            "title_it": service.title_it,
            "status": service.status,
        })),
    );

    Ok((StatusCode::CREATED, Json(service)))
}

#[tracing::instrument(skip_all, fields(service_id = id))]
async fn update_service(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
    Json(command): Json<UpdateServiceCommand>,
) -> AppResult<Json<Service>> {
    let (service, changes) = update::handle(&pool, id, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Update, ResourceType::Services)
            .meta(json!({ "serviceId": id, "changes": changes })),
    );

    Ok(Json(service))
}

#[tracing::instrument(skip_all, fields(service_id = id))]
async fn delete_service(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete::handle(&pool, id).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Delete, ResourceType::Services)
            .meta(json!({ "serviceId": id })),
    );

    Ok(StatusCode::NO_CONTENT)
}
