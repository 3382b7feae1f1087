use sqlx::PgPool;

use crate::features::brands::types::Brand;

/// Every brand, alphabetical.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
    sqlx::query_as::<_, Brand>("SELECT * FROM brands ORDER BY name ASC")
        .fetch_all(pool)
        .await
}
