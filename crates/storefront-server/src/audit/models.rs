//! Audit data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ============================================================================
// Audit Query Constants
// ============================================================================

/// Default number of audit entries returned per query
pub const DEFAULT_AUDIT_QUERY_LIMIT: i64 = 100;

/// Maximum number of audit entries that can be returned in a single query.
pub const MAX_AUDIT_QUERY_LIMIT: i64 = 1000;

/// Verbs recorded by the storefront routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Register,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Register => "REGISTER",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        action.as_str().to_string()
    }
}

/// Entities named in the audit trail (table names, plus `auth` for sessions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Products,
    Brands,
    Categories,
    BlogPosts,
    Services,
    TrattoriNuovi,
    TrattoriUsati,
    Users,
    Admins,
    Auth,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Brands => "brands",
            Self::Categories => "categories",
            Self::BlogPosts => "blog_posts",
            Self::Services => "services",
            Self::TrattoriNuovi => "trattori_nuovi",
            Self::TrattoriUsati => "trattori_usati",
            Self::Users => "users",
            Self::Admins => "admins",
            Self::Auth => "auth",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ResourceType> for String {
    fn from(resource: ResourceType) -> Self {
        resource.as_str().to_string()
    }
}

/// What a handler asks the recorder to log.
///
/// `action` and `entity` are free-form; an event missing either is dropped.
/// `user_id` / `user_email` override whatever identity the request carries.
///
/// ```rust,ignore
/// let event = AuditEvent::new(AuditAction::Delete, ResourceType::Products)
///     .meta(json!({ "productId": 42 }));
/// recorder.record(&audit, event);
/// ```
#[derive(Debug, Clone)]
pub struct AuditEvent<M = JsonValue> {
    pub action: String,
    pub entity: String,
    pub meta: Option<M>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
}

impl AuditEvent<JsonValue> {
    pub fn new(action: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            entity: entity.into(),
            meta: None,
            user_id: None,
            user_email: None,
        }
    }
}

impl<M> AuditEvent<M> {
    pub fn meta<N>(self, meta: N) -> AuditEvent<N> {
        AuditEvent {
            action: self.action,
            entity: self.entity,
            meta: Some(meta),
            user_id: self.user_id,
            user_email: self.user_email,
        }
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// Override both actor fields at once, e.g. for the user who just logged in.
    pub fn actor(self, user_id: i64, email: impl Into<String>) -> Self {
        self.user_id(user_id).user_email(email)
    }
}

/// A fully prepared row, ready to append
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub action: String,
    pub entity: String,
    pub meta: Option<String>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Audit log row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: i64,
    pub action: String,
    pub entity: String,
    pub meta: Option<String>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn from_record(id: i64, record: AuditRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            action: record.action,
            entity: record.entity,
            meta: record.meta,
            user_id: record.user_id,
            user_email: record.user_email,
            ip: record.ip,
            user_agent: record.user_agent,
            created_at,
        }
    }
}

/// Query parameters for `GET /api/audit`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub action: Option<String>,
    pub entity: Option<String>,
    pub user_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_AUDIT_QUERY_LIMIT
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            action: None,
            entity: None,
            user_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl AuditQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_AUDIT_QUERY_LIMIT)
    }

    pub fn effective_offset(&self) -> i64 {
        self.offset.max(0)
    }
}

/// Audit entry as returned by the API, with `meta` parsed back to JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogItem {
    pub id: i64,
    pub action: String,
    pub entity: String,
    pub meta: JsonValue,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditLogItem {
    fn from(entry: AuditEntry) -> Self {
        let meta = entry
            .meta
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(JsonValue::Null);

        Self {
            id: entry.id,
            action: entry.action,
            entity: entry.entity,
            meta,
            user_id: entry.user_id,
            user_email: entry.user_email,
            created_at: entry.created_at,
        }
    }
}
