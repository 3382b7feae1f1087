//! Read-only listing of site users (session required)

pub mod queries;
pub mod routes;

pub use routes::users_routes;
