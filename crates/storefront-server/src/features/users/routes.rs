//! User API routes (session required)
//!
//! - `GET /api/users?page&take` - newest first, 50 per page by default (max 100)
//! - `GET /api/users/:id` - `{"user": {...}}`

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::queries::{list, ListUsersQuery};
use crate::auth::{require_session, SessionKeys};
use crate::error::{AppError, AppResult};
use crate::features::auth::queries::find_user_by_id;
use crate::features::auth::UserSummary;
use crate::features::shared::pagination::ListPage;
use crate::state::AppState;

pub fn users_routes(sessions: SessionKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session))
}

#[tracing::instrument(skip(pool))]
async fn list_users(
    State(pool): State<PgPool>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<ListPage<UserSummary>>> {
    Ok(Json(list::handle(&pool, query).await?))
}

/// # Response
///
/// - `200 OK` - `{"user": {...}}`
/// - `404 Not Found` - no such user
#[tracing::instrument(skip(pool))]
async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let user = find_user_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(json!({ "user": user })))
}
