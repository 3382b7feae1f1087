//! Session authentication
//!
//! Sessions are HS256 JWTs delivered in an HttpOnly cookie (or an
//! `Authorization: Bearer` header for API clients). Back-office routes sit
//! behind [`require_session`], which attaches an [`AuthenticatedUser`] to the
//! request for handlers and the audit recorder.

pub mod cookies;
pub mod middleware;
pub mod password;
pub mod session;

pub use cookies::CookiePolicy;
pub use middleware::{require_session, AuthenticatedUser};
pub use password::{hash_password, verify_password};
pub use session::{SessionClaims, SessionError, SessionKeys};
