use sqlx::PgPool;

use crate::features::brands::types::BrandError;
use crate::features::shared::update::delete_by_id;

/// Deleting a missing brand is not an error.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, id: i64) -> Result<(), BrandError> {
    let removed = delete_by_id(pool, "brands", id).await?;
    tracing::info!(brand_id = id, removed, "Brand deleted");
    Ok(())
}
