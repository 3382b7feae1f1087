//! Service list: optional text search and status filter, newest first

use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::services::types::Service;
use crate::features::shared::filters::{search_text, Filters};
use crate::features::shared::pagination::{ListPage, PageRequest, CATALOG_PAGE_SIZE};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListServicesQuery {
    /// Case-insensitive substring of `title_it` or `slug`
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ListServicesQuery) {
    let mut filters = Filters::new(builder);
    if let Some(q) = search_text(query.q.as_deref()) {
        filters.contains_any(&["title_it", "slug"], q);
    }
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        filters.and().push("status = ").push_bind(status.to_string());
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, query: ListServicesQuery) -> Result<ListPage<Service>, sqlx::Error> {
    let request = PageRequest::fixed(query.page, CATALOG_PAGE_SIZE);

    let mut count = QueryBuilder::new("SELECT COUNT(*) FROM services");
    push_filters(&mut count, &query);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut select = QueryBuilder::new("SELECT * FROM services");
    push_filters(&mut select, &query);
    select
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(request.take)
        .push(" OFFSET ")
        .push_bind(request.offset());
    let items = select.build_query_as::<Service>().fetch_all(pool).await?;

    Ok(ListPage::new(items, total, request))
}
