use sqlx::PgPool;

use crate::features::categories::types::CategoryError;
use crate::features::shared::update::delete_by_id;

/// Products in the category keep existing with `category_id = NULL`.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, id: i64) -> Result<(), CategoryError> {
    let removed = delete_by_id(pool, "categories", id).await?;
    tracing::info!(category_id = id, removed, "Category deleted");
    Ok(())
}
