//! HTTP surface: mounts every feature router under `/api` and applies the
//! shared middleware stack.

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::compression::CompressionLayer;

use crate::audit::audit_routes;
use crate::config::Config;
use crate::features::{
    admins::admins_routes,
    auth::auth_routes,
    blog::blog_routes,
    brands::brands_routes,
    categories::categories_routes,
    health::{health_routes, liveness},
    products::products_routes,
    services::services_routes,
    tractors::{tractors_routes, TractorStock},
    users::users_routes,
};
use crate::middleware;
use crate::state::AppState;

/// JSON bodies up to 10 MiB.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let sessions = state.sessions.clone();

    let api = Router::new()
        .nest("/health", health_routes())
        .route("/test", get(liveness))
        .nest("/auth", auth_routes())
        .nest("/admins", admins_routes(sessions.clone()))
        .nest("/users", users_routes(sessions.clone()))
        .nest("/brands", brands_routes(sessions.clone()))
        .nest("/categories", categories_routes(sessions.clone()))
        .nest("/products", products_routes(sessions.clone()))
        .nest("/services", services_routes(sessions.clone()))
        .nest("/blog", blog_routes(sessions.clone()))
        .nest(
            "/trattori/nuovi",
            tractors_routes(TractorStock::New, sessions.clone()),
        )
        .nest(
            "/trattori/usati",
            tractors_routes(TractorStock::Used, sessions.clone()),
        )
        .nest("/audit", audit_routes(sessions));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        // Innermost first
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
