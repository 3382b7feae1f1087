use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use crate::error::AppError;
use crate::features::brands::Brand;
use crate::features::categories::Category;
use crate::features::shared::error_helpers::map_write_error;
use crate::features::shared::validation::MissingFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub slug: String,
    pub title_it: Option<String>,
    pub title_en: Option<String>,
    pub description_it: Option<String>,
    pub description_en: Option<String>,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub year: Option<i32>,
    pub power_cv: Option<i32>,
    pub price_cents: Option<i64>,
    pub used: bool,
    pub features: Option<JsonValue>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMedia {
    pub url: Option<String>,
}

/// An image as embedded in product reads: `{id, order, media: {url}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub order: i32,
    pub media: ImageMedia,
}

/// A product with its brand, category and images
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub brand: Option<Brand>,
    pub category: Option<Category>,
    pub images: Vec<ProductImage>,
}

/// Image as sent by clients on create/update: `{url, order}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInput {
    pub url: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("Product not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::MissingFields(_) => AppError::Validation(err.to_string()),
            ProductError::NotFound => AppError::NotFound(err.to_string()),
            ProductError::Database(e) => map_write_error(e, "Product slug already in use"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_flattens_product_fields() {
        let now = Utc::now();
        let detail = ProductDetail {
            product: Product {
                id: 5,
                slug: "fendt-724".into(),
                title_it: Some("Fendt 724 Vario".into()),
                title_en: None,
                description_it: None,
                description_en: None,
                brand_id: None,
                category_id: None,
                year: Some(2021),
                power_cv: Some(240),
                price_cents: Some(18_900_000),
                used: true,
                features: Some(json!({ "hours": 1200 })),
                status: "PUBLISHED".into(),
                created_at: now,
                updated_at: now,
            },
            brand: None,
            category: None,
            images: vec![ProductImage {
                id: 1,
                order: 0,
                media: ImageMedia {
                    url: Some("/uploads/a.jpg".into()),
                },
            }],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["slug"], "fendt-724");
        assert_eq!(value["features"]["hours"], 1200);
        assert_eq!(value["brand"], JsonValue::Null);
        assert_eq!(value["images"][0]["media"]["url"], "/uploads/a.jpg");
    }

    #[test]
    fn test_image_order_defaults_to_zero() {
        let image: ImageInput = serde_json::from_str(r#"{"url":"/uploads/b.jpg"}"#).unwrap();
        assert_eq!(image.order, 0);
    }
}
