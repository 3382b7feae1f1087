//! Signed session tokens (HS256 JWT)

use std::sync::Arc;

use axum::http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::cookies::{bearer_token, cookie_value, CookiePolicy};
use crate::config::SessionConfig;

/// Claims carried by a session token.
///
/// `uid` also accepts the older `id` claim name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to sign session token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("Session token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Signing keys plus cookie policy, shared by the guard, the auth routes and
/// the audit recorder.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<Inner>,
}

struct Inner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    cookie: CookiePolicy,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("cookie", &self.inner.cookie)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
                validation: Validation::default(),
                cookie: CookiePolicy {
                    name: config.cookie_name.clone(),
                    max_age_secs: config.max_age_secs,
                    production: config.production,
                    domain: config.cookie_domain.clone(),
                },
            }),
        }
    }

    pub fn cookie(&self) -> &CookiePolicy {
        &self.inner.cookie
    }

    /// Sign a token for the given user, valid for the cookie lifetime.
    pub fn issue(&self, uid: i64, email: &str) -> Result<String, SessionError> {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            uid: Some(uid),
            email: Some(email.to_string()),
            iat: now,
            exp: now + self.inner.cookie.max_age_secs as i64,
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.inner.encoding)
            .map_err(SessionError::Sign)
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.inner.decoding, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(SessionError::Invalid)
    }

    /// The request's session credential: bearer header first, then the session cookie.
    pub fn credential(&self, headers: &HeaderMap) -> Option<String> {
        bearer_token(headers).or_else(|| cookie_value(headers, &self.inner.cookie.name))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{Config, SessionConfig};

    pub const TEST_SECRET: &str = "test-secret";

    pub fn session_config() -> SessionConfig {
        SessionConfig {
            jwt_secret: TEST_SECRET.to_string(),
            ..Config::default().session
        }
    }

    pub fn keys() -> SessionKeys {
        SessionKeys::new(&session_config())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::keys;
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_issue_then_verify() {
        let keys = keys();
        let token = keys.issue(7, "a@b.com").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.uid, Some(7));
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.exp - claims.iat, 60 * 60 * 24 * 7);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = keys().issue(1, "x@y.it").unwrap();
        let other = SessionKeys::new(&SessionConfig {
            jwt_secret: "another-secret".to_string(),
            ..super::test_support::session_config()
        });
        assert!(matches!(other.verify(&token), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let now = chrono::Utc::now().timestamp();
        let token = keys
            .sign(&SessionClaims {
                uid: Some(3),
                email: None,
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(keys().verify("not.a.jwt").is_err());
        assert!(keys().verify("").is_err());
    }

    #[test]
    fn test_legacy_id_claim() {
        let claims: SessionClaims =
            serde_json::from_str(r#"{"id":9,"email":"old@shop.it","iat":1,"exp":2}"#).unwrap();
        assert_eq!(claims.uid, Some(9));
    }

    #[test]
    fn test_credential_prefers_bearer_over_cookie() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=from-cookie"));
        assert_eq!(keys.credential(&headers).as_deref(), Some("from-cookie"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(keys.credential(&headers).as_deref(), Some("from-header"));
    }
}
