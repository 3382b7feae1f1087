//! Partial product update
//!
//! Present fields are written (`null` included). `brand_id` / `category_id`
//! are normalized as on create. An `images` array replaces the whole image
//! list. Everything runs in one transaction.

use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};
use sqlx::{PgConnection, PgPool};

use crate::features::products::images::{existing_id, images_change, replace_images};
use crate::features::products::types::{ImageInput, Product, ProductError};
use crate::features::shared::patch::deserialize_some;
use crate::features::shared::update::{fetch_by_id, UpdateStatement};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductCommand {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub brand_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub power_cv: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub price_cents: Option<Option<i64>>,
    /// `null` clears the flag.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub used: Option<Option<bool>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub features: Option<Option<JsonValue>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
    /// Only an array replaces the images; `null` leaves them alone.
    #[serde(default)]
    pub images: Option<Vec<ImageInput>>,
}

impl UpdateProductCommand {
    /// Every column except the two references, which need a lookup.
    fn statement(&self) -> UpdateStatement<'static> {
        let mut update = UpdateStatement::new("products").touch_updated_at();
        for (column, value) in [
            ("slug", &self.slug),
            ("title_it", &self.title_it),
            ("title_en", &self.title_en),
            ("description_it", &self.description_it),
            ("description_en", &self.description_en),
            ("status", &self.status),
        ] {
            if let Some(value) = value {
                update.set(column, value.clone());
            }
        }
        for (column, value) in [("year", self.year), ("power_cv", self.power_cv)] {
            if let Some(value) = value {
                update.set(column, value);
            }
        }
        if let Some(price_cents) = self.price_cents {
            update.set("price_cents", price_cents);
        }
        if let Some(used) = self.used {
            update.set("used", used.unwrap_or(false));
        }
        if let Some(features) = &self.features {
            let features = features.clone().filter(|f| !f.is_null());
            update.set("features", features);
        }
        update
    }
}

async fn normalize_references(
    conn: &mut PgConnection,
    command: &UpdateProductCommand,
    update: &mut UpdateStatement<'static>,
) -> Result<(), sqlx::Error> {
    if let Some(brand_id) = command.brand_id {
        let brand_id = existing_id(&mut *conn, "brands", brand_id).await?;
        update.set_recorded("brand_id", brand_id, json!(brand_id));
    }
    if let Some(category_id) = command.category_id {
        let category_id = existing_id(&mut *conn, "categories", category_id).await?;
        update.set_recorded("category_id", category_id, json!(category_id));
    }
    Ok(())
}

/// Returns the stored product and the applied `changes` (empty when the body
/// carried nothing updatable).
#[tracing::instrument(skip(pool, command))]
pub async fn handle(
    pool: &PgPool,
    id: i64,
    command: UpdateProductCommand,
) -> Result<(Product, Map<String, JsonValue>), ProductError> {
    let mut tx = pool.begin().await?;

    let mut update = command.statement();
    normalize_references(&mut tx, &command, &mut update).await?;

    let product = if update.has_assignments() {
        update.fetch_optional::<_, Product>(&mut *tx, id).await?
    } else {
        fetch_by_id::<_, Product>(&mut *tx, "products", id).await?
    };
    let product = product.ok_or(ProductError::NotFound)?;

    if let Some(images) = &command.images {
        replace_images(&mut tx, id, images).await?;
        update.record_change("images", images_change(images));
    }

    tx.commit().await?;
    Ok((product, update.into_changes()))
}
