use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::features::shared::error_helpers::map_write_error;
use crate::features::shared::validation::MissingFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub slug: String,
    pub title_it: Option<String>,
    pub title_en: Option<String>,
    pub content_it: Option<String>,
    pub content_en: Option<String>,
    pub cover_media_id: Option<i64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("No fields to update")]
    NoFields,

    #[error("Service not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingFields(_) | ServiceError::NoFields => {
                AppError::Validation(err.to_string())
            },
            ServiceError::NotFound => AppError::NotFound(err.to_string()),
            ServiceError::Database(e) => map_write_error(e, "Service slug already in use"),
        }
    }
}
