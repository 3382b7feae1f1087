//! Back-office administrator accounts

pub mod commands;
pub mod routes;

pub use routes::admins_routes;
