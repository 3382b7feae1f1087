use sqlx::PgPool;

use crate::features::categories::types::Category;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name_it ASC")
        .fetch_all(pool)
        .await
}
