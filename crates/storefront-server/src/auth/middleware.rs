//! Session guard for back-office routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::session::{SessionClaims, SessionKeys};
use crate::error::AppError;

/// Identity attached to the request by [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Option<i64>,
    pub email: Option<String>,
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.uid,
            email: claims.email,
        }
    }
}

/// Reject requests without a valid session and attach [`AuthenticatedUser`]
/// to the ones that have one.
///
/// ```rust,ignore
/// Router::new()
///     .route("/", post(create_brand))
///     .route_layer(axum::middleware::from_fn_with_state(keys, require_session))
/// ```
pub async fn require_session(
    State(keys): State<SessionKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = keys
        .credential(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let claims = keys.verify(&token).map_err(|e| {
        tracing::debug!(error = %e, "Session verification failed");
        AppError::Unauthorized("Session expired or invalid".to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::test_support::keys;
    use axum::{
        body::{to_bytes, Body},
        http::{header, StatusCode},
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let keys = keys();
        Router::new()
            .route(
                "/whoami",
                get(|Extension(user): Extension<AuthenticatedUser>| async move {
                    format!("{:?}:{:?}", user.id, user.email)
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(keys, require_session))
    }

    async fn call(request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_credential_is_401() {
        let request = axum::http::Request::get("/whoami").body(Body::empty()).unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Not authenticated"));
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let request = axum::http::Request::get("/whoami")
            .header(header::COOKIE, "auth_token=forged")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Session expired or invalid"));
    }

    #[tokio::test]
    async fn test_valid_cookie_attaches_identity() {
        let token = keys().issue(12, "admin@shop.it").unwrap();
        let request = axum::http::Request::get("/whoami")
            .header(header::COOKIE, format!("auth_token={}", token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"Some(12):Some("admin@shop.it")"#);
    }
}
