use sqlx::PgPool;

use crate::features::shared::update::fetch_by_id;
use crate::features::tractors::types::{Tractor, TractorError, TractorStock};

#[tracing::instrument(skip(pool), fields(table = stock.table()))]
pub async fn handle(pool: &PgPool, stock: TractorStock, id: i64) -> Result<Tractor, TractorError> {
    fetch_by_id::<_, Tractor>(pool, stock.table(), id)
        .await?
        .ok_or(TractorError::NotFound)
}
