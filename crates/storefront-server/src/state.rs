//! Shared application state

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::audit::AuditRecorder;
use crate::auth::SessionKeys;

/// State handed to every route. Handlers pull the part they need with
/// `State<PgPool>`, `State<AuditRecorder>` or `State<SessionKeys>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: PgPool,
    pub recorder: AuditRecorder,
    pub sessions: SessionKeys,
}

impl AppState {
    /// Production wiring: the recorder writes to the same pool.
    pub fn new(db: PgPool, sessions: SessionKeys) -> Self {
        let recorder = AuditRecorder::postgres(db.clone(), sessions.clone());
        Self {
            db,
            recorder,
            sessions,
        }
    }
}
