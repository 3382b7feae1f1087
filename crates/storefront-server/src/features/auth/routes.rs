//! Auth API routes
//!
//! - `GET /api/auth/__ping` - liveness of the auth scope
//! - `POST /api/auth/register` - create an account and start a session
//! - `POST /api/auth/login` - start a session
//! - `GET /api/auth/me` - the current session's user
//! - `POST /api/auth/logout` - drop the session cookie

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::commands::{login, register, LoginCommand, RegisterUserCommand};
use super::queries::find_user_by_id;
use super::types::{PublicUser, UserSummary};
use crate::audit::{AuditAction, AuditContext, AuditEvent, AuditRecorder, ResourceType};
use crate::auth::SessionKeys;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/__ping", get(ping))
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/me", get(current_user))
        .route("/logout", post(logout))
}

async fn ping() -> impl IntoResponse {
    Json(json!({ "ok": true, "scope": "auth" }))
}

fn session_cookie(keys: &SessionKeys, user: &UserSummary) -> AppResult<String> {
    let token = keys
        .issue(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(keys.cookie().set(&token))
}

/// # Request Body
///
/// ```json
/// { "name": "Mario Rossi", "email": "mario@rossi.it", "password": "at-least-8" }
/// ```
///
/// # Response
///
/// - `201 Created` - `{"user": {...}}`, session cookie set
/// - `400 Bad Request` - invalid name, email or password
/// - `409 Conflict` - email already registered
#[tracing::instrument(skip_all)]
async fn register_user(
    State(pool): State<PgPool>,
    State(keys): State<SessionKeys>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<RegisterUserCommand>,
) -> AppResult<Response> {
    let user = register::handle(&pool, command).await?;
    let cookie = session_cookie(&keys, &user)?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Register, ResourceType::Users)
            .meta(json!({ "userId": user.id, "email": user.email }))
            .actor(user.id, user.email.clone()),
    );

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "user": user })),
    )
        .into_response())
}

/// # Response
///
/// - `200 OK` - `{"user": {"id", "name", "email"}}`, session cookie set
/// - `400 Bad Request` - email or password missing
/// - `401 Unauthorized` - unknown email or wrong password
#[tracing::instrument(skip_all)]
async fn login_user(
    State(pool): State<PgPool>,
    State(keys): State<SessionKeys>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
    Json(command): Json<LoginCommand>,
) -> AppResult<Response> {
    let user = login::handle(&pool, command).await?;
    let cookie = session_cookie(&keys, &user)?;

    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Login, ResourceType::Auth)
            .meta(json!({ "userId": user.id, "email": user.email }))
            .actor(user.id, user.email.clone()),
    );
    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "user": PublicUser::from(user) })),
    )
        .into_response())
}

/// # Response
///
/// - `200 OK` - `{"user": {...}}`
/// - `401 Unauthorized` - no session, invalid session, or the user is gone
#[tracing::instrument(skip_all)]
async fn current_user(
    State(pool): State<PgPool>,
    State(keys): State<SessionKeys>,
    headers: HeaderMap,
) -> AppResult<Json<serde_json::Value>> {
    let claims = keys
        .credential(&headers)
        .and_then(|token| keys.verify(&token).ok())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let invalid = || AppError::Unauthorized("Session expired or invalid".to_string());
    let uid = claims.uid.ok_or_else(invalid)?;
    let user = find_user_by_id(&pool, uid).await?.ok_or_else(invalid)?;

    Ok(Json(json!({ "user": user })))
}

/// The actor is resolved from the credential the request still carries.
///
/// # Response
///
/// `200 OK` - `{"ok": true}`, session cookie cleared
#[tracing::instrument(skip_all)]
async fn logout(
    State(keys): State<SessionKeys>,
    State(recorder): State<AuditRecorder>,
    audit: AuditContext,
) -> Response {
    recorder.record(
        &audit,
        AuditEvent::new(AuditAction::Logout, ResourceType::Auth).meta(json!({ "ok": true })),
    );

    (
        [(header::SET_COOKIE, keys.cookie().clear())],
        Json(json!({ "ok": true })),
    )
        .into_response()
}
