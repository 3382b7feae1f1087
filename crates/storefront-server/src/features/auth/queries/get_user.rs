//! User lookups shared by the auth and users features

use sqlx::PgPool;

use crate::features::auth::types::{UserCredentials, UserSummary};

#[tracing::instrument(skip(pool))]
pub async fn find_user_by_id(pool: &PgPool, id: i64) -> Result<Option<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        "SELECT id, name, email, created_at FROM users WHERE id = $1 LIMIT 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// `email` must already be lower-cased.
pub(crate) async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1 LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}
