//! Tractor list: optional text search over name and description, newest first

use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::shared::filters::{search_text, Filters};
use crate::features::shared::pagination::{ListPage, PageRequest, CATALOG_PAGE_SIZE};
use crate::features::tractors::types::{Tractor, TractorStock};

pub const MAX_TRACTORS_PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTractorsQuery {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub take: Option<i64>,
}

impl ListTractorsQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::clamped(self.page, self.take, CATALOG_PAGE_SIZE, MAX_TRACTORS_PAGE_SIZE)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ListTractorsQuery) {
    let mut filters = Filters::new(builder);
    if let Some(q) = search_text(query.q.as_deref()) {
        filters.contains_any(&["name", "description"], q);
    }
}

#[tracing::instrument(skip(pool), fields(table = stock.table()))]
pub async fn handle(
    pool: &PgPool,
    stock: TractorStock,
    query: ListTractorsQuery,
) -> Result<ListPage<Tractor>, sqlx::Error> {
    let request = query.page_request();

    let mut count = QueryBuilder::new("SELECT COUNT(*) FROM ");
    count.push(stock.table());
    push_filters(&mut count, &query);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut select = QueryBuilder::new("SELECT * FROM ");
    select.push(stock.table());
    push_filters(&mut select, &query);
    select
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(request.take)
        .push(" OFFSET ")
        .push_bind(request.offset());
    let items = select.build_query_as::<Tractor>().fetch_all(pool).await?;

    Ok(ListPage::new(items, total, request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_is_clamped() {
        let query = ListTractorsQuery {
            take: Some(500),
            ..Default::default()
        };
        assert_eq!(query.page_request().take, 50);

        let query = ListTractorsQuery {
            take: Some(0),
            page: Some(-3),
            ..Default::default()
        };
        assert_eq!(query.page_request(), PageRequest { page: 1, take: 1 });
        assert_eq!(ListTractorsQuery::default().page_request().take, 12);
    }

    #[test]
    fn test_search_sql() {
        let query = ListTractorsQuery {
            q: Some("  frutteto ".into()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM trattori_usati");
        push_filters(&mut builder, &query);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM trattori_usati WHERE (name ILIKE $1 OR description ILIKE $2)"
        );
    }
}
