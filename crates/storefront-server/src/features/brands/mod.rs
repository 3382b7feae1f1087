//! Tractor and equipment brands
//!
//! Public read, session-guarded writes.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::brands_routes;
pub use types::{Brand, BrandError};
