use sqlx::PgPool;

use crate::features::products::types::ProductError;
use crate::features::shared::update::delete_by_id;

/// Image rows go with the product (`ON DELETE CASCADE`).
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, id: i64) -> Result<(), ProductError> {
    let removed = delete_by_id(pool, "products", id).await?;
    tracing::info!(product_id = id, removed, "Product deleted");
    Ok(())
}
