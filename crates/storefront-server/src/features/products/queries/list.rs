//! Filtered product list, 12 per page, newest first

use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::embed;
use crate::features::products::types::{Product, ProductDetail};
use crate::features::shared::filters::{search_text, Filters};
use crate::features::shared::pagination::{ListPage, PageRequest, CATALOG_PAGE_SIZE};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    /// Case-insensitive substring of `title_it` or `slug`
    pub q: Option<String>,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    /// `used=true` selects used machines; any other value selects new ones.
    pub used: Option<String>,
    pub status: Option<String>,
    /// Bounds on `price_cents`, inclusive
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub page: Option<i64>,
}

impl ListProductsQuery {
    fn used_flag(&self) -> Option<bool> {
        self.used.as_deref().map(|v| v == "true")
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ListProductsQuery) {
    let mut filters = Filters::new(builder);
    if let Some(q) = search_text(query.q.as_deref()) {
        filters.contains_any(&["title_it", "slug"], q);
    }
    if let Some(brand_id) = query.brand_id {
        filters.and().push("brand_id = ").push_bind(brand_id);
    }
    if let Some(category_id) = query.category_id {
        filters.and().push("category_id = ").push_bind(category_id);
    }
    if let Some(used) = query.used_flag() {
        filters.and().push("used = ").push_bind(used);
    }
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        filters.and().push("status = ").push_bind(status.to_string());
    }
    if let Some(price_min) = query.price_min {
        filters.and().push("price_cents >= ").push_bind(price_min);
    }
    if let Some(price_max) = query.price_max {
        filters.and().push("price_cents <= ").push_bind(price_max);
    }
    if let Some(year_min) = query.year_min {
        filters.and().push("year >= ").push_bind(year_min);
    }
    if let Some(year_max) = query.year_max {
        filters.and().push("year <= ").push_bind(year_max);
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, query: ListProductsQuery) -> Result<ListPage<ProductDetail>, sqlx::Error> {
    let request = PageRequest::fixed(query.page, CATALOG_PAGE_SIZE);

    let mut count = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filters(&mut count, &query);
    let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut select = QueryBuilder::new("SELECT * FROM products");
    push_filters(&mut select, &query);
    select
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(request.take)
        .push(" OFFSET ")
        .push_bind(request.offset());
    let products = select.build_query_as::<Product>().fetch_all(pool).await?;

    Ok(ListPage::new(embed(pool, products).await?, total, request))
}
