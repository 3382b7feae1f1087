use serde::Deserialize;
use sqlx::PgPool;

use crate::features::brands::types::{Brand, BrandError};
use crate::features::shared::validation::require_fields;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBrandCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub logo_media_id: Option<i64>,
}

impl CreateBrandCommand {
    pub fn validate(&self) -> Result<(), BrandError> {
        require_fields(&[("name", self.name.as_deref()), ("slug", self.slug.as_deref())])?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool), fields(slug = ?command.slug))]
pub async fn handle(pool: &PgPool, command: CreateBrandCommand) -> Result<Brand, BrandError> {
    command.validate()?;

    let brand = sqlx::query_as::<_, Brand>(
        r#"
        INSERT INTO brands (name, slug, logo_media_id)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(command.name)
    .bind(command.slug)
    .bind(command.logo_media_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(brand_id = brand.id, "Brand created");
    Ok(brand)
}
