use sqlx::PgPool;

use crate::features::services::types::ServiceError;
use crate::features::shared::update::delete_by_id;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, id: i64) -> Result<(), ServiceError> {
    let removed = delete_by_id(pool, "services", id).await?;
    tracing::info!(service_id = id, removed, "Service deleted");
    Ok(())
}
