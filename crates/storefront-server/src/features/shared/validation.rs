//! Shared validation utilities
//!
//! ```rust,ignore
//! use storefront_server::features::shared::validation::{require_fields, validate_email};
//!
//! require_fields(&[("name", command.name.as_deref()), ("slug", command.slug.as_deref())])?;
//! validate_email(&command.email)?;
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum display-name length (after trimming).
pub const MIN_NAME_LENGTH: usize = 2;

/// Status given to content created without one.
pub const DEFAULT_STATUS: &str = "DRAFT";

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

/// Errors produced by the account field validators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// One or more required fields are absent or blank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} required", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// True for `None`, `""` and whitespace-only strings
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Check that every named field carries a non-blank value.
///
/// The error lists all missing fields in the order given, e.g.
/// `"name, slug required"`.
pub fn require_fields(fields: &[(&'static str, Option<&str>)]) -> Result<(), MissingFields> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFields(missing))
    }
}

pub fn validate_display_name(name: &str) -> Result<(), AccountValidationError> {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(AccountValidationError::NameTooShort {
            min: MIN_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Loose shape check: something, an `@`, something, a dot, something.
pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    let valid = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email));
    if valid {
        Ok(())
    } else {
        Err(AccountValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), AccountValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Blank or missing status falls back to [`DEFAULT_STATUS`].
pub fn status_or_default(status: Option<String>) -> String {
    status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string())
}
