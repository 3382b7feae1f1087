//! New and used tractor stock
//!
//! Both stocks share one implementation over two identically shaped tables
//! (`trattori_nuovi`, `trattori_usati`). The router is mounted once per stock
//! with the [`TractorStock`] attached as a request extension.

pub mod coerce;
pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::tractors_routes;
pub use types::{Tractor, TractorError, TractorStock};
