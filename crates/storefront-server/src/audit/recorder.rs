//! The audit recorder
//!
//! Handlers call [`AuditRecorder::record`] after their primary mutation. The
//! recorder resolves the actor, captures client metadata, serializes `meta`
//! and appends the row on a detached task. Nothing it does can change the
//! handler's response: every failure ends up in the operational log.

use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, error};

use super::context::AuditContext;
use super::identity::{resolve_actor, Actor};
use super::meta::serialize_meta;
use super::models::{AuditEvent, AuditRecord};
use super::sink::{AuditSink, PgAuditSink};
use crate::auth::SessionKeys;

#[derive(Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
    keys: SessionKeys,
}

impl std::fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRecorder").finish_non_exhaustive()
    }
}

impl AuditRecorder {
    pub fn new(sink: Arc<dyn AuditSink>, keys: SessionKeys) -> Self {
        Self { sink, keys }
    }

    /// Recorder appending to the `audit_log` table.
    pub fn postgres(pool: PgPool, keys: SessionKeys) -> Self {
        Self::new(Arc::new(PgAuditSink::new(pool)), keys)
    }

    /// Build the row for `event`, or `None` when action or entity is missing.
    ///
    /// Explicit actor overrides on the event win field by field; when both are
    /// present the request identity is not resolved at all.
    pub fn prepare<M: Serialize>(
        &self,
        ctx: &AuditContext,
        event: AuditEvent<M>,
    ) -> Option<AuditRecord> {
        let action = event.action.trim();
        let entity = event.entity.trim();
        if action.is_empty() || entity.is_empty() {
            debug!(action, entity, "Skipping audit event without action or entity");
            return None;
        }

        let actor = match (event.user_id, &event.user_email) {
            (Some(id), Some(email)) => Actor {
                id: Some(id),
                email: Some(email.clone()),
            },
            (id, email) => {
                let resolved = resolve_actor(&ctx.identity, &self.keys);
                Actor {
                    id: id.or(resolved.id),
                    email: email.clone().or(resolved.email),
                }
            },
        };

        Some(AuditRecord {
            action: action.to_string(),
            entity: entity.to_string(),
            meta: serialize_meta(event.meta.as_ref()),
            user_id: actor.id,
            user_email: actor.email,
            ip: ctx.client.ip.clone(),
            user_agent: ctx.client.user_agent.clone(),
        })
    }

    /// Record without waiting: the append runs on a detached task.
    pub fn record<M: Serialize>(&self, ctx: &AuditContext, event: AuditEvent<M>) {
        let Some(record) = self.prepare(ctx, event) else {
            return;
        };
        let sink = Arc::clone(&self.sink);
        tokio::spawn(append(sink, record));
    }

    /// Record and wait for the append to finish. Failures, including a
    /// panicking sink, are still only logged.
    pub async fn record_and_wait<M: Serialize>(&self, ctx: &AuditContext, event: AuditEvent<M>) {
        let Some(record) = self.prepare(ctx, event) else {
            return;
        };
        if let Err(e) = tokio::spawn(append(Arc::clone(&self.sink), record)).await {
            error!(error = %e, "Audit append task failed");
        }
    }
}

async fn append(sink: Arc<dyn AuditSink>, record: AuditRecord) {
    let action = record.action.clone();
    let entity = record.entity.clone();
    match sink.append(record).await {
        Ok(entry) => debug!(audit_id = entry.id, %action, %entity, "Audit record stored"),
        Err(e) => error!(error = %e, %action, %entity, "Failed to store audit record"),
    }
}
