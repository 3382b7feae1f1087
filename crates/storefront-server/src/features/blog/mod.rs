//! Blog posts
//!
//! Same shape as services plus excerpts and a publication timestamp.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::blog_routes;
pub use types::{BlogError, BlogPost};
