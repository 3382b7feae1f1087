use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::features::shared::error_helpers::map_write_error;
use crate::features::shared::validation::MissingFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name_it: String,
    pub name_en: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("No fields to update")]
    NoFields,

    #[error("Category not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::MissingFields(_) | CategoryError::NoFields => {
                AppError::Validation(err.to_string())
            },
            CategoryError::NotFound => AppError::NotFound(err.to_string()),
            CategoryError::Database(e) => map_write_error(e, "Category slug already in use"),
        }
    }
}
