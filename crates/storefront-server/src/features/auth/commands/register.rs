//! Register a site user
//!
//! # Rules
//!
//! - `name`: at least 2 characters after trimming
//! - `email`: `something@something.tld`, stored lower-cased, unique
//! - `password`: at least 8 characters, stored as an argon2 hash

use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::features::auth::queries::find_user_by_email;
use crate::features::auth::types::UserSummary;
use crate::features::shared::error_helpers::is_unique_violation;
use crate::features::shared::validation::{
    validate_display_name, validate_email, validate_password, AccountValidationError,
};

#[derive(Clone, Deserialize)]
pub struct RegisterUserCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error(transparent)]
    Validation(#[from] AccountValidationError),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RegisterUserError> for AppError {
    fn from(err: RegisterUserError) -> Self {
        match err {
            RegisterUserError::Validation(e) => AppError::Validation(e.to_string()),
            RegisterUserError::EmailTaken => AppError::Conflict(err.to_string()),
            RegisterUserError::Hash(message) => AppError::Internal(message),
            RegisterUserError::Database(e) => AppError::Database(e),
        }
    }
}

/// Validated fields, email normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: String,
    pub password: &'a str,
}

impl RegisterUserCommand {
    pub fn validate(&self) -> Result<NewUser<'_>, RegisterUserError> {
        let name = self.name.as_deref().unwrap_or_default();
        validate_display_name(name)?;

        let email = self.email.as_deref().unwrap_or_default();
        validate_email(email)?;

        let password = self.password.as_deref().unwrap_or_default();
        validate_password(password)?;

        Ok(NewUser {
            name: name.trim(),
            email: email.to_lowercase(),
            password,
        })
    }
}

#[tracing::instrument(skip(pool, command), fields(email = ?command.email))]
pub async fn handle(pool: &PgPool, command: RegisterUserCommand) -> Result<UserSummary, RegisterUserError> {
    let user = command.validate()?;

    if find_user_by_email(pool, &user.email).await?.is_some() {
        return Err(RegisterUserError::EmailTaken);
    }

    let password_hash =
        hash_password(user.password).map_err(|e| RegisterUserError::Hash(e.to_string()))?;

    let created = sqlx::query_as::<_, UserSummary>(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(user.name)
    .bind(&user.email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            RegisterUserError::EmailTaken
        } else {
            RegisterUserError::Database(e)
        }
    })?;

    tracing::info!(user_id = created.id, "User registered");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, email: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_validate_normalizes() {
        let cmd = command("  Mario Rossi ", "Mario@Rossi.IT", "password123");
        let user = cmd.validate().unwrap();
        assert_eq!(user.name, "Mario Rossi");
        assert_eq!(user.email, "mario@rossi.it");
    }

    #[test]
    fn test_validate_rejects_each_field() {
        assert!(matches!(
            command("M", "m@r.it", "password123").validate(),
            Err(RegisterUserError::Validation(AccountValidationError::NameTooShort { .. }))
        ));
        assert!(matches!(
            command("Mario", "not-an-email", "password123").validate(),
            Err(RegisterUserError::Validation(AccountValidationError::InvalidEmail))
        ));
        assert!(matches!(
            command("Mario", "m@r.it", "short").validate(),
            Err(RegisterUserError::Validation(AccountValidationError::PasswordTooShort { .. }))
        ));
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let empty: RegisterUserCommand = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", command("Mario", "m@r.it", "hunter2hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_register_then_duplicate(pool: PgPool) {
        let user = handle(&pool, command("Mario", "Mario@Rossi.it", "password123"))
            .await
            .unwrap();
        assert_eq!(user.email, "mario@rossi.it");

        let err = handle(&pool, command("Other", "mario@rossi.it", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterUserError::EmailTaken));
    }
}
