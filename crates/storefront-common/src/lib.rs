//! Storefront Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared plumbing for storefront workspace members. Today that is the
//! logging setup used by the server binary.

pub mod logging;
