//! Feature modules implementing the storefront API
//!
//! Each feature is a vertical slice with its own commands, queries and routes.
//!
//! # Features
//!
//! - **auth**: user registration, login, logout and the current session
//! - **admins**: admin account creation (session required)
//! - **users**: user listing for the back office
//! - **brands** / **categories**: catalog taxonomy
//! - **products**: catalog products with embedded brand, category and images
//! - **tractors**: new and used tractor stock, one implementation per table
//! - **services** / **blog**: editorial content
//! - **health**: liveness and database probes
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions and audit recording
//! - `types.rs` - Row types and the feature's error enum
//!
//! Helpers used by more than one slice (pagination, PATCH statements, list
//! filters, validation) live in `shared`.

pub mod admins;
pub mod auth;
pub mod blog;
pub mod brands;
pub mod categories;
pub mod health;
pub mod products;
pub mod services;
pub mod shared;
pub mod tractors;
pub mod users;
