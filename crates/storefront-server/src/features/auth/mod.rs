//! Site user accounts: registration, login, session lookup and logout
//!
//! Sessions are issued as the signed cookie described in [`crate::auth`].

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::auth_routes;
pub use types::{PublicUser, UserSummary};
