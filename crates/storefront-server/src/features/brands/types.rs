use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::features::shared::error_helpers::map_write_error;
use crate::features::shared::validation::MissingFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_media_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("No fields to update")]
    NoFields,

    #[error("Brand not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<BrandError> for AppError {
    fn from(err: BrandError) -> Self {
        match err {
            BrandError::MissingFields(_) | BrandError::NoFields => {
                AppError::Validation(err.to_string())
            },
            BrandError::NotFound => AppError::NotFound(err.to_string()),
            BrandError::Database(e) => map_write_error(e, "Brand slug already in use"),
        }
    }
}
