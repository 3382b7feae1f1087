//! Check a user's credentials

use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::verify_password;
use crate::error::AppError;
use crate::features::auth::queries::find_user_by_email;
use crate::features::auth::types::UserSummary;
use crate::features::shared::validation::is_blank;

#[derive(Clone, Deserialize)]
pub struct LoginCommand {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Email and password are required")]
    MissingCredentials,

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::MissingCredentials => AppError::BadRequest(err.to_string()),
            LoginError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            LoginError::Database(e) => AppError::Database(e),
        }
    }
}

impl LoginCommand {
    pub fn validate(&self) -> Result<(String, &str), LoginError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !is_blank(Some(email)) && !password.is_empty() => {
                Ok((email.trim().to_lowercase(), password))
            },
            _ => Err(LoginError::MissingCredentials),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(email = ?command.email))]
pub async fn handle(pool: &PgPool, command: LoginCommand) -> Result<UserSummary, LoginError> {
    let (email, password) = command.validate()?;

    let Some(user) = find_user_by_email(pool, &email).await? else {
        tracing::debug!("Login for unknown email");
        return Err(LoginError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
        tracing::debug!(user_id = user.id, "Login with wrong password");
        return Err(LoginError::InvalidCredentials);
    }

    Ok(user.into())
}
