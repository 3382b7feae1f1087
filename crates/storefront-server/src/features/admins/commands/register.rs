//! Create an administrator account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::auth::hash_password;
use crate::error::AppError;
use crate::features::shared::error_helpers::is_unique_violation;
use crate::features::shared::validation::{require_fields, MissingFields};

#[derive(Clone, Deserialize)]
pub struct RegisterAdminCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for RegisterAdminCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAdminCommand")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AdminCreated {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterAdminError {
    #[error("All fields are required")]
    MissingFields(#[from] MissingFields),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RegisterAdminError> for AppError {
    fn from(err: RegisterAdminError) -> Self {
        match err {
            RegisterAdminError::MissingFields(_) => AppError::Validation(err.to_string()),
            RegisterAdminError::EmailTaken => AppError::Conflict(err.to_string()),
            RegisterAdminError::Hash(message) => AppError::Internal(message),
            RegisterAdminError::Database(e) => AppError::Database(e),
        }
    }
}

impl RegisterAdminCommand {
    pub fn validate(&self) -> Result<(), RegisterAdminError> {
        require_fields(&[
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("password", self.password.as_deref()),
        ])?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(email = ?command.email))]
pub async fn handle(pool: &PgPool, command: RegisterAdminCommand) -> Result<AdminCreated, RegisterAdminError> {
    command.validate()?;
    let name = command.name.unwrap_or_default();
    let email = command.email.unwrap_or_default();
    let password = command.password.unwrap_or_default();

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM admins WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(RegisterAdminError::EmailTaken);
    }

    let password_hash =
        hash_password(&password).map_err(|e| RegisterAdminError::Hash(e.to_string()))?;

    let admin = sqlx::query_as::<_, AdminCreated>(
        r#"
        INSERT INTO admins (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            RegisterAdminError::EmailTaken
        } else {
            RegisterAdminError::Database(e)
        }
    })?;

    tracing::info!(admin_id = admin.id, "Admin registered");
    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        let cmd: RegisterAdminCommand =
            serde_json::from_str(r#"{"name":"Anna","email":"anna@shop.it"}"#).unwrap();
        let err = cmd.validate().unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
        assert_eq!(
            AppError::from(err).status(),
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_duplicate_admin_email(pool: PgPool) {
        let cmd = RegisterAdminCommand {
            name: Some("Anna".into()),
            email: Some("anna@shop.it".into()),
            password: Some("s3cret!".into()),
        };
        let admin = handle(&pool, cmd.clone()).await.unwrap();
        assert_eq!(admin.email, "anna@shop.it");

        assert!(matches!(
            handle(&pool, cmd).await,
            Err(RegisterAdminError::EmailTaken)
        ));
    }
}
