//! Database error handling utilities
//!
//! ```rust,ignore
//! use storefront_server::features::shared::error_helpers::map_write_error;
//!
//! sqlx::query("INSERT INTO brands ...")
//!     .execute(pool)
//!     .await
//!     .map_err(|e| map_write_error(e, "Slug already in use"))?;
//! ```

use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;

use crate::error::AppError;

/// Result of checking for a database constraint violation
#[derive(Debug)]
pub enum ConstraintViolation {
    /// A unique constraint was violated
    UniqueViolation,
    /// A NOT NULL column received null
    NotNullViolation(String),
    /// A foreign key constraint was violated
    ForeignKeyViolation,
    /// No constraint violation - some other error occurred
    Other(SqlxError),
}

/// Check the type of database constraint violation
pub fn check_constraint_violation(error: SqlxError) -> ConstraintViolation {
    if let SqlxError::Database(ref db_err) = error {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return ConstraintViolation::UniqueViolation,
            ErrorKind::ForeignKeyViolation => return ConstraintViolation::ForeignKeyViolation,
            ErrorKind::NotNullViolation => {
                return ConstraintViolation::NotNullViolation(db_err.message().to_string())
            },
            _ => {},
        }
    }
    ConstraintViolation::Other(error)
}

/// Check if the error is a unique constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

/// Map an INSERT/UPDATE failure onto the API error taxonomy.
///
/// - unique violation -> `409` with `conflict_message`
/// - null written into a required column -> `400`
/// - foreign key violation -> `400`
/// - anything else -> `500`
pub fn map_write_error(error: SqlxError, conflict_message: &str) -> AppError {
    match check_constraint_violation(error) {
        ConstraintViolation::UniqueViolation => AppError::Conflict(conflict_message.to_string()),
        ConstraintViolation::NotNullViolation(message) => {
            tracing::debug!(%message, "Rejected null for a required column");
            AppError::BadRequest("A required field cannot be null".to_string())
        },
        ConstraintViolation::ForeignKeyViolation => {
            AppError::BadRequest("Referenced record does not exist".to_string())
        },
        ConstraintViolation::Other(e) => AppError::Database(e),
    }
}
