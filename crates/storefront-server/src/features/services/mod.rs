//! Services offered by the dealership (repairs, rentals, ...)

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::services_routes;
pub use types::{Service, ServiceError};
