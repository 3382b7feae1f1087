use sqlx::PgPool;

use super::embed;
use crate::features::products::types::{Product, ProductDetail, ProductError};

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, id: i64) -> Result<ProductDetail, ProductError> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProductError::NotFound)?;

    embed(pool, vec![product])
        .await?
        .pop()
        .ok_or(ProductError::NotFound)
}
