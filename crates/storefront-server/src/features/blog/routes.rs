//! Blog API routes
//!
//! - `GET /api/blog?q&status&page` - 12 per page, newest first
//! - `POST /api/blog` - create (session required)
//! - `PATCH /api/blog/:id` - partial update (session required)
//! - `DELETE /api/blog/:id` - delete (session required)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{create, delete, update, CreatePostCommand, UpdatePostCommand};
use super::queries::{list, ListPostsQuery};
use super::types::BlogPost;
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::{require_session, SessionKeys};
use crate::error::AppResult;
use crate::features::shared::pagination::ListPage;
use crate::state::AppState;

pub fn blog_routes(sessions: SessionKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_post))
        .route("/:id", patch(update_post).delete(delete_post))
        .route_layer(axum::middleware::from_fn_with_state(sessions, require_session));

    Router::new().route("/", get(list_posts)).merge(protected)
}

#[tracing::instrument(skip(pool))]
async fn list_posts(
    State(pool): State<PgPool>,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<Json<ListPage<BlogPost>>> {
    Ok(Json(list::handle(&pool, query).await?))
}

/// # Response
///
/// - `201 Created` - the post
/// - `400 Bad Request` - `slug`, `title_it` or `content_it` missing
/// - `409 Conflict` - slug already in use
#[tracing::instrument(skip_all)]
async fn create_post(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<CreatePostCommand>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    let post = create::handle(&pool, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Create, ResourceType::BlogPosts).meta(json!({
            "postId": post.id,
            "slug": post.slug,
            "title_it": post.title_it,
            "status": post.status,
        })),
    );

    Ok((StatusCode::CREATED, Json(post)))
}

#[tracing::instrument(skip_all, fields(post_id = id))]
async fn update_post(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
    Json(command): Json<UpdatePostCommand>,
) -> AppResult<Json<BlogPost>> {
    let (post, changes) = update::handle(&pool, id, command).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Update, ResourceType::BlogPosts)
            .meta(json!({ "postId": id, "changes": changes })),
    );

    Ok(Json(post))
}

#[tracing::instrument(skip_all, fields(post_id = id))]
async fn delete_post(
    State(pool): State<PgPool>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete::handle(&pool, id).await?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Delete, ResourceType::BlogPosts).meta(json!({ "postId": id })),
    );

    Ok(StatusCode::NO_CONTENT)
}
