//! Liveness and database health probes

pub mod routes;

pub use routes::{health_routes, liveness};
