//! Brand API routes
//!
//! - `GET /api/brands` - all brands, by name
//! - `POST /api/brands` - create (session required)
//! - `PATCH /api/brands/:id` - partial update (session required)
//! - `DELETE /api/brands/:id` - delete (session required)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{create, delete, update, CreateBrandCommand, UpdateBrandCommand};
use super::queries::list;
use super::types::Brand;
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::state::AppState;

pub fn brands_routes(sessions: SessionKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_brand))
        .route("/:id", patch(update_brand).delete(delete_brand))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session));

    Router::new().route("/", get(list_brands)).merge(protected)
}

async fn list_brands(State(pool): State<PgPool>) -> AppResult<Json<Vec<Brand>>> {
    Ok(Json(list::handle(&pool).await?))
}

/// # Request Body
///
/// ```json
/// { "name": "Fendt", "slug": "fendt", "logo_media_id": 3 }
/// ```
///
/// # Response
///
/// - `201 Created` - the brand
/// - `400 Bad Request` - name or slug missing
/// - `409 Conflict` - slug already in use
#[tracing::instrument(skip_all)]
async fn create_brand(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<CreateBrandCommand>,
) -> AppResult<(StatusCode, Json<Brand>)> {
    let brand = create::handle(&pool, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, ResourceType::Brands).meta(json!({
            "brandId": brand.id,
            "name": brand.name,
            "slug": brand.slug,
            "logoMediaId": brand.logo_media_id,
        })),
    );

    Ok((StatusCode::CREATED, Json(brand)))
}

/// # Response
///
/// - `200 OK` - the updated brand
/// - `400 Bad Request` - no updatable field in the body
/// - `404 Not Found` - no such brand
#[tracing::instrument(skip_all, fields(brand_id = id))]
async fn update_brand(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
    Json(command): Json<UpdateBrandCommand>,
) -> AppResult<Json<Brand>> {
    let (brand, changes) = update::handle(&pool, id, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Update, ResourceType::Brands)
            .meta(json!({ "brandId": id, "changes": changes })),
    );

    Ok(Json(brand))
}

#[tracing::instrument(skip_all, fields(brand_id = id))]
async fn delete_brand(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete::handle(&pool, id).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Delete, ResourceType::Brands).meta(json!({ "brandId": id })),
    );

    Ok(StatusCode::NO_CONTENT)
}
