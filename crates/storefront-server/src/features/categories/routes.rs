//! Category API routes
//!
//! - `GET /api/categories` - all categories, by Italian name
//! - `POST /api/categories` - create (session required)
//! - `PATCH /api/categories/:id` - partial update (session required)
//! - `DELETE /api/categories/:id` - delete (session required)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{create, delete, update, CreateCategoryCommand, UpdateCategoryCommand};
use super::queries::list;
use super::types::Category;
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::state::AppState;

pub fn categories_routes(sessions: SessionKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_category))
        .route("/:id", patch(update_category).delete(delete_category))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session));

    Router::new().route("/", get(list_categories)).merge(protected)
}

async fn list_categories(State(pool): State<PgPool>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(list::handle(&pool).await?))
}

/// # Response
///
/// - `201 Created` - the category
/// - `400 Bad Request` - `name_it`, `name_en` or `slug` missing
/// - `409 Conflict` - slug already in use
#[tracing::instrument(skip_all)]
async fn create_category(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<CreateCategoryCommand>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = create::handle(&pool, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, ResourceType::Categories).meta(json!({
            "categoryId": category.id,
            "name_it": category.name_it,
            "name_en": category.name_en,
            "slug": category.slug,
        })),
    );

    Ok((StatusCode::CREATED, Json(category)))
}

#[tracing::instrument(skip_all, fields(category_id = id))]
async fn update_category(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
    Json(command): Json<UpdateCategoryCommand>,
) -> AppResult<Json<Category>> {
    let (category, changes) = update::handle(&pool, id, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Update, ResourceType::Categories)
            .meta(json!({ "categoryId": id, "changes": changes })),
    );

    Ok(Json(category))
}

#[tracing::instrument(skip_all, fields(category_id = id))]
async fn delete_category(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete::handle(&pool, id).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Delete, ResourceType::Categories)
            .meta(json!({ "categoryId": id })),
    );

    Ok(StatusCode::NO_CONTENT)
}
