//! Tractor API routes, mounted at `/api/trattori/nuovi` and `/api/trattori/usati`
//!
//! - `GET /?q&page&take` - newest first, `take` 1..=50 (default 12)
//! - `GET /:id` - one row
//! - `POST /` - create (session required)
//! - `PATCH /:id` - partial update (session required)
//! - `DELETE /:id` - delete (session required)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{create, delete, update, CreateTractorCommand, UpdateTractorCommand};
use super::queries::{get, list, ListTractorsQuery};
use super::types::{Tractor, TractorStock};
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::features::shared::pagination::ListPage;
use crate::state::AppState;

pub fn tractors_routes(stock: TractorStock, sessions: SessionKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_tractor))
        .route(
            "/:id",
            axum::routing::patch(update_tractor).delete(delete_tractor),
        )
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session));

    Router::new()
        .route("/", get(list_tractors))
        .route("/:id", get(get_tractor))
        .merge(protected)
        .layer(Extension(stock))
}

#[tracing::instrument(skip(pool))]
async fn list_tractors(
    State(pool): State<PgPool>,
    Extension(stock): Extension<TractorStock>,
    Query(query): Query<ListTractorsQuery>,
) -> AppResult<Json<ListPage<Tractor>>> {
    Ok(Json(list::handle(&pool, stock, query).await?))
}

#[tracing::instrument(skip(pool))]
async fn get_tractor(
    State(pool): State<PgPool>,
    Extension(stock): Extension<TractorStock>,
    Path(id): Path<i64>,
) -> AppResult<Json<Tractor>> {
    Ok(Json(get::handle(&pool, stock, id).await?))
}

/// # Request Body
///
/// ```json
/// { "name": "Fendt 211 Vario", "photo": "/uploads/211.jpg", "price": "45.000", "quantity": 2 }
/// ```
///
/// A numeric `price` is taken as cents, a string as euros.
///
/// # Response
///
/// - `201 Created` - the stored row
/// - `400 Bad Request` - name missing
#[tracing::instrument(skip_all)]
async fn create_tractor(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    Extension(stock): Extension<TractorStock>,
    audit: AuditContext,
    Json(command): Json<CreateTractorCommand>,
) -> AppResult<(StatusCode, Json<Tractor>)> {
    let tractor = create::handle(&pool, stock, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, stock.resource()).meta(json!({
            "itemId": tractor.id,
            "name": tractor.name,
            "price_cents": tractor.price_cents,
            "quantity": tractor.quantity,
        })),
    );

    Ok((StatusCode::CREATED, Json(tractor)))
}

#[tracing::instrument(skip_all, fields(item_id = id))]
async fn update_tractor(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    Extension(stock): Extension<TractorStock>,
    audit: AuditContext,
    Path(id): Path<i64>,
    Json(command): Json<UpdateTractorCommand>,
) -> AppResult<Json<Tractor>> {
    let (tractor, changes) = update::handle(&pool, stock, id, command).await?;

    if !changes.is_empty() {
        recorder.record(
            &audit,
            AuditEvent::new(AuditAction::Update, stock.resource())
                .meta(json!({ "itemId": id, "changes": changes })),
        );
    }

    Ok(Json(tractor))
}

#[tracing::instrument(skip_all, fields(item_id = id))]
async fn delete_tractor(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    Extension(stock): Extension<TractorStock>,
    audit: AuditContext,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete::handle(&pool, stock, id).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Delete, stock.resource()).meta(json!({ "itemId": id })),
    );

    Ok(StatusCode::NO_CONTENT)
}
