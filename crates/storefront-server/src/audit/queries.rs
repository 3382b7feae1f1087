//! Database queries for the audit log

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::models::{AuditEntry, AuditQuery, AuditRecord};

const AUDIT_COLUMNS: &str =
    "id, action, entity, meta, user_id, user_email, ip, user_agent, created_at";

/// Append a single row and return it with its generated id and timestamp.
pub async fn insert_audit_record(
    pool: &PgPool,
    record: &AuditRecord,
) -> Result<AuditEntry, sqlx::Error> {
    let entry = sqlx::query_as::<_, AuditEntry>(&format!(
        r#"
        INSERT INTO audit_log (action, entity, meta, user_id, user_email, ip, user_agent)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {AUDIT_COLUMNS}
        "#
    ))
    .bind(&record.action)
    .bind(&record.entity)
    .bind(&record.meta)
    .bind(record.user_id)
    .bind(&record.user_email)
    .bind(&record.ip)
    .bind(&record.user_agent)
    .fetch_one(pool)
    .await?;

    debug!(
        audit_id = entry.id,
        action = %entry.action,
        entity = %entry.entity,
        "Created audit log entry"
    );

    Ok(entry)
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &AuditQuery) {
    builder.push(" WHERE 1=1");
    if let Some(ref action) = query.action {
        builder.push(" AND action = ").push_bind(action.clone());
    }
    if let Some(ref entity) = query.entity {
        builder.push(" AND entity = ").push_bind(entity.clone());
    }
    if let Some(user_id) = query.user_id {
        builder.push(" AND user_id = ").push_bind(user_id);
    }
}

/// Newest-first page of the audit log plus the total matching the filters.
pub async fn query_audit_log(
    pool: &PgPool,
    query: &AuditQuery,
) -> Result<(Vec<AuditEntry>, i64), sqlx::Error> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM audit_log");
    push_filters(&mut count, query);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {AUDIT_COLUMNS} FROM audit_log"));
    push_filters(&mut select, query);
    select
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(query.effective_limit())
        .push(" OFFSET ")
        .push_bind(query.effective_offset());

    let entries = select.build_query_as::<AuditEntry>().fetch_all(pool).await?;

    debug!(count = entries.len(), total, "Queried audit log");

    Ok((entries, total))
}
