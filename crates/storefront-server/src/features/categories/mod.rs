//! Product categories (Italian and English names)

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::categories_routes;
pub use types::{Category, CategoryError};
