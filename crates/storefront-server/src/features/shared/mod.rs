//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: page/take parameters and the common list envelope
//! - **validation**: input validation utilities
//! - **error_helpers**: database error mapping
//! - **filters**: WHERE-clause assembly for list queries
//! - **patch**: "field present" tracking for PATCH bodies
//! - **update**: dynamic `UPDATE ... SET` builder that also collects the audit `changes`

pub mod error_helpers;
pub mod filters;
pub mod pagination;
pub mod patch;
pub mod update;
pub mod validation;

pub use error_helpers::map_write_error;
pub use filters::{search_text, Filters};
pub use pagination::{ListPage, PageRequest};
pub use patch::deserialize_some;
pub use update::{delete_by_id, fetch_by_id, UpdateStatement};
pub use validation::{is_blank, require_fields};
