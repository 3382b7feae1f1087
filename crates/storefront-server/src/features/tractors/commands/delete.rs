use sqlx::PgPool;

use crate::features::shared::update::delete_by_id;
use crate::features::tractors::types::{TractorError, TractorStock};

#[tracing::instrument(skip(pool), fields(table = stock.table()))]
pub async fn handle(pool: &PgPool, stock: TractorStock, id: i64) -> Result<(), TractorError> {
    let removed = delete_by_id(pool, stock.table(), id).await?;
    tracing::info!(item_id = id, removed, "Tractor deleted");
    Ok(())
}
