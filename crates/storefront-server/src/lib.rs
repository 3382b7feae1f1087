//! Storefront Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
//!
//! REST backend for a tractor dealer's catalog: products, brands,
//! categories, new and used tractor stock, blog posts and services, plus
//! user accounts with cookie sessions.
//!
//! # Architecture
//!
//! - **Features** (`features/`): one vertical slice per resource, split into
//!   commands (writes) and queries (reads).
//! - **Sessions** (`auth/`): HS256 tokens carried in an HTTP-only cookie or a
//!   bearer header; `require_session` guards every write.
//! - **Audit** (`audit/`): every successful write appends one row to
//!   `audit_log` with the actor, client IP and user agent. Recording never
//!   fails a request.
//!
//! ## Framework Stack
//!
//! - **Axum**: routing and extractors
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower**: middleware (CORS, tracing, compression)
//!
//! # Example
//!
//! ```no_run
//! use sqlx::postgres::PgPoolOptions;
//! use storefront_server::{api, auth::SessionKeys, config::Config, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let db = PgPoolOptions::new().connect(&config.database.url).await?;
//!     let app = api::create_router(AppState::new(db, SessionKeys::new(&config.session)), &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod state;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use state::AppState;
