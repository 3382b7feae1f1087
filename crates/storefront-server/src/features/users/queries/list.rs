//! Paginated user list, newest first

use serde::Deserialize;
use sqlx::PgPool;

use crate::features::auth::UserSummary;
use crate::features::shared::pagination::{ListPage, PageRequest};

pub const DEFAULT_USERS_PAGE_SIZE: i64 = 50;
pub const MAX_USERS_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub take: Option<i64>,
}

impl ListUsersQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::clamped(self.page, self.take, DEFAULT_USERS_PAGE_SIZE, MAX_USERS_PAGE_SIZE)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, query: ListUsersQuery) -> Result<ListPage<UserSummary>, sqlx::Error> {
    let request = query.page_request();

    let items = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, name, email, created_at
        FROM users
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(request.take)
    .bind(request.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(ListPage::new(items, total, request))
}
