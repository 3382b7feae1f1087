//! Catalog products
//!
//! Products reference a brand and a category (both optional) and own an
//! ordered list of images. Reads embed all three; writes that touch images
//! run in one transaction.

pub mod commands;
pub mod images;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::products_routes;
pub use types::{Product, ProductDetail, ProductError, ProductImage};
