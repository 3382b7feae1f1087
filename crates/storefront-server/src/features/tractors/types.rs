use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::audit::ResourceType;
use crate::error::AppError;
use crate::features::shared::error_helpers::map_write_error;

/// Which stock table a request works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TractorStock {
    New,
    Used,
}

impl TractorStock {
    pub fn table(self) -> &'static str {
        self.resource().as_str()
    }

    /// Audit entity, identical to the table name.
    pub fn resource(self) -> ResourceType {
        match self {
            Self::New => ResourceType::TrattoriNuovi,
            Self::Used => ResourceType::TrattoriUsati,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tractor {
    pub id: i64,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub price_cents: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum TractorError {
    #[error("name is required")]
    NameRequired,

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<TractorError> for AppError {
    fn from(err: TractorError) -> Self {
        match err {
            TractorError::NameRequired => AppError::Validation(err.to_string()),
            TractorError::NotFound => AppError::NotFound(err.to_string()),
            TractorError::Database(e) => map_write_error(e, "Tractor already exists"),
        }
    }
}
