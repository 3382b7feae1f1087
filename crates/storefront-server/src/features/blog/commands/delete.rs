use sqlx::PgPool;

use crate::features::blog::types::BlogError;
use crate::features::shared::update::delete_by_id;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool, id: i64) -> Result<(), BlogError> {
    let removed = delete_by_id(pool, "blog_posts", id).await?;
    tracing::info!(post_id = id, removed, "Blog post deleted");
    Ok(())
}
