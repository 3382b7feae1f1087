//! Create a product together with its images
//!
//! `brand_id` / `category_id` that do not reference an existing row are
//! stored as NULL instead of failing the insert.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::features::products::images::{existing_id, insert_images};
use crate::features::products::types::{ImageInput, Product, ProductError};
use crate::features::shared::validation::{require_fields, status_or_default};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductCommand {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title_it: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub description_it: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub brand_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub power_cv: Option<i32>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub used: Option<bool>,
    #[serde(default)]
    pub features: Option<JsonValue>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ImageInput>>,
}

/// The stored product plus the number of images written with it.
#[derive(Debug, Clone)]
pub struct ProductCreated {
    pub product: Product,
    pub images_count: usize,
}

impl CreateProductCommand {
    pub fn validate(&self) -> Result<(), ProductError> {
        require_fields(&[("slug", self.slug.as_deref())])?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(slug = ?command.slug))]
pub async fn handle(pool: &PgPool, command: CreateProductCommand) -> Result<ProductCreated, ProductError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    let brand_id = existing_id(&mut tx, "brands", command.brand_id).await?;
    let category_id = existing_id(&mut tx, "categories", command.category_id).await?;
    if brand_id != command.brand_id || category_id != command.category_id {
        tracing::debug!(?brand_id, ?category_id, "Dropped dangling product references");
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products
            (slug, title_it, title_en, description_it, description_en, brand_id, category_id,
             year, power_cv, price_cents, used, features, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(command.slug)
    .bind(command.title_it)
    .bind(command.title_en)
    .bind(command.description_it)
    .bind(command.description_en)
    .bind(brand_id)
    .bind(category_id)
    .bind(command.year)
    .bind(command.power_cv)
    .bind(command.price_cents)
    .bind(command.used.unwrap_or(false))
    .bind(command.features.filter(|f| !f.is_null()))
    .bind(status_or_default(command.status))
    .fetch_one(&mut *tx)
    .await?;

    let images = command.images.unwrap_or_default();
    insert_images(&mut tx, product.id, &images).await?;

    tx.commit().await?;

    tracing::info!(product_id = product.id, images = images.len(), "Product created");
    Ok(ProductCreated {
        product,
        images_count: images.len(),
    })
}
