//! Product API routes
//!
//! - `GET /api/products?q&brandId&categoryId&used&status&priceMin&priceMax&yearMin&yearMax&page`
//! - `GET /api/products/:id` - one product with brand, category and images
//! - `POST /api/products` - create (session required)
//! - `PATCH /api/products/:id` - partial update (session required)
//! - `DELETE /api/products/:id` - delete (session required)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{create, delete, update, CreateProductCommand, UpdateProductCommand};
use super::queries::{get, list, ListProductsQuery};
use super::types::{Product, ProductDetail};
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::features::shared::pagination::ListPage;
use crate::state::AppState;

pub fn products_routes(sessions: SessionKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_product))
        .route(
            "/:id",
            axum::routing::patch(update_product).delete(delete_product),
        )
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session));

    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .merge(protected)
}

#[tracing::instrument(skip(pool))]
async fn list_products(
    State(pool): State<PgPool>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<ListPage<ProductDetail>>> {
    Ok(Json(list::handle(&pool, query).await?))
}

/// # Response
///
/// - `200 OK` - the product with `brand`, `category` and `images`
/// - `404 Not Found` - no such product
#[tracing::instrument(skip(pool))]
async fn get_product(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Json<ProductDetail>> {
    Ok(Json(get::handle(&pool, id).await?))
}

/// # Request Body
///
/// ```json
/// {
///   "slug": "fendt-724-vario",
///   "title_it": "Fendt 724 Vario",
///   "brand_id": 1,
///   "category_id": 2,
///   "price_cents": 18900000,
///   "used": true,
///   "features": { "hours": 1200 },
///   "images": [{ "url": "/uploads/front.jpg", "order": 0 }]
/// }
/// ```
///
/// # Response
///
/// - `201 Created` - the product row
/// - `400 Bad Request` - slug missing
/// - `409 Conflict` - slug already in use
#[tracing::instrument(skip_all)]
async fn create_product(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<CreateProductCommand>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let created = create::handle(&pool, command).await?;
    let product = created.product;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, ResourceType::Products).meta(json!({
            "productId": product.id,
            "slug": product.slug,
            "brandId": product.brand_id,
            "categoryId": product.category_id,
            "status": product.status,
            "imagesCount": created.images_count,
        })),
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// Nothing is audited when the body carried no known field.
#[tracing::instrument(skip_all, fields(product_id = id))]
async fn update_product(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
    Json(command): Json<UpdateProductCommand>,
) -> AppResult<Json<Product>> {
    let (product, changes) = update::handle(&pool, id, command).await?;

    if !changes.is_empty() {
        recorder.record(
            &audit,
            AuditEvent::new(AuditAction::Update, ResourceType::Products)
                .meta(json!({ "productId": id, "changes": changes })),
        );
    }

    Ok(Json(product))
}

#[tracing::instrument(skip_all, fields(product_id = id))]
async fn delete_product(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete::handle(&pool, id).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Delete, ResourceType::Products)
            .meta(json!({ "productId": id })),
    );

    Ok(StatusCode::NO_CONTENT)
}
