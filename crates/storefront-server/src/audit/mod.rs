//! Audit logging
//!
//! Every mutating route records what happened in the append-only
//! `audit_log` table: the action, the entity, a JSON `meta` payload, the actor
//! and the client's IP and user agent.
//!
//! # Recording
//!
//! Handlers take an [`AuditContext`] extractor and hand an [`AuditEvent`] to
//! the shared [`AuditRecorder`] once their own write succeeded:
//!
//! ```rust,ignore
//! async fn delete_product(
//!     State(state): State<AppState>,
//!     audit: AuditContext,
//!     Path(id): Path<i64>,
//! ) -> AppResult<StatusCode> {
//!     commands::delete::handle(&state.db, id).await?;
//!     state.recorder.record(
//!         &audit,
//!         AuditEvent::new(AuditAction::Delete, ResourceType::Products)
//!             .meta(json!({ "productId": id })),
//!     );
//!     Ok(StatusCode::NO_CONTENT)
//! }
//! ```
//!
//! The actor comes from the identity attached by the session guard, or from
//! verifying the request's bearer token or session cookie. Anything that
//! fails along the way (bad token, unserializable meta, a failed insert)
//! degrades to nulls or a log line, never to an error response.

mod client;
mod context;
mod identity;
mod meta;
mod models;
mod queries;
mod recorder;
mod routes;
mod sink;


pub use client::ClientInfo;
pub use context::AuditContext;
pub use identity::{resolve_actor, Actor, Identity};
pub use meta::serialize_meta;
pub use models::{
    AuditAction, AuditEntry, AuditEvent, AuditLogItem, AuditQuery, AuditRecord, ResourceType,
    DEFAULT_AUDIT_QUERY_LIMIT, MAX_AUDIT_QUERY_LIMIT,
};
pub use queries::{insert_audit_record, query_audit_log};
pub use recorder::AuditRecorder;
pub use routes::{audit_routes, AuditLogPage};
pub use sink::{AuditSink, AuditSinkError, MemoryAuditSink, PgAuditSink};
