//! Where prepared audit records are appended

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::models::{AuditEntry, AuditRecord};
use super::queries::insert_audit_record;

#[derive(Debug, thiserror::Error)]
pub enum AuditSinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Append-only storage for audit records
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: AuditRecord) -> Result<AuditEntry, AuditSinkError>;
}

/// Production sink writing to the `audit_log` table
#[derive(Debug, Clone)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<AuditEntry, AuditSinkError> {
        Ok(insert_audit_record(&self.pool, &record).await?)
    }
}

/// In-process sink for tests and local experiments.
///
/// A sink built with [`MemoryAuditSink::failing`] rejects every append.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
    failing: AtomicBool,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let sink = Self::default();
        sink.failing.store(true, Ordering::SeqCst);
        sink
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<AuditEntry, AuditSinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuditSinkError::Unavailable("memory sink set to fail".to_string()));
        }

        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = AuditEntry::from_record(entries.len() as i64 + 1, record, Utc::now());
        entries.push(entry.clone());
        Ok(entry)
    }
}
