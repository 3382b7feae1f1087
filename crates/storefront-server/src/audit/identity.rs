//! Actor resolution
//!
//! The recorder never assumes the session guard ran. A request either carries
//! an identity attached by the guard, an unverified credential, or nothing.

use axum::http::HeaderMap;

use crate::auth::{AuthenticatedUser, SessionKeys};

/// Who performed an action. Both fields are null for anonymous requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    pub id: Option<i64>,
    pub email: Option<String>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Already verified by the session guard.
    Attached(Actor),
    /// A session token that still has to be verified.
    FromCredential(String),
    Anonymous,
}

impl Identity {
    /// Build the identity from what the request carries: an attached user
    /// first, then a bearer token, then the session cookie.
    pub fn from_request(
        attached: Option<&AuthenticatedUser>,
        headers: &HeaderMap,
        keys: &SessionKeys,
    ) -> Self {
        if let Some(user) = attached {
            return Identity::Attached(Actor {
                id: user.id,
                email: user.email.clone(),
            });
        }

        match keys.credential(headers) {
            Some(token) => Identity::FromCredential(token),
            None => Identity::Anonymous,
        }
    }
}

/// Resolve an identity to an actor. Verification failures of any kind
/// (expired, malformed, wrong signature) resolve to the anonymous actor.
pub fn resolve_actor(identity: &Identity, keys: &SessionKeys) -> Actor {
    match identity {
        Identity::Attached(actor) => actor.clone(),
        Identity::Anonymous => Actor::anonymous(),
        Identity::FromCredential(token) => match keys.verify(token) {
            Ok(claims) => Actor {
                id: claims.uid,
                email: claims.email,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Audit credential did not verify, recording as anonymous");
                Actor::anonymous()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::test_support::keys;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_attached_identity_wins_without_verification() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=garbage"));
        let user = AuthenticatedUser {
            id: Some(5),
            email: Some("guard@shop.it".into()),
        };

        let identity = Identity::from_request(Some(&user), &headers, &keys);
        assert!(matches!(identity, Identity::Attached(_)));
        assert_eq!(
            resolve_actor(&identity, &keys),
            Actor { id: Some(5), email: Some("guard@shop.it".into()) }
        );
    }

    #[test]
    fn test_no_credential_is_anonymous() {
        let keys = keys();
        let identity = Identity::from_request(None, &HeaderMap::new(), &keys);
        assert_eq!(identity, Identity::Anonymous);
        assert_eq!(resolve_actor(&identity, &keys), Actor::anonymous());
    }

    #[test]
    fn test_valid_cookie_resolves_to_subject() {
        let keys = keys();
        let token = keys.issue(7, "a@b.com").unwrap();
        let identity = Identity::FromCredential(token);
        assert_eq!(
            resolve_actor(&identity, &keys),
            Actor { id: Some(7), email: Some("a@b.com".into()) }
        );
    }

    #[test]
    fn test_invalid_token_is_anonymous() {
        let keys = keys();
        let identity = Identity::FromCredential("definitely-not-a-jwt".into());
        assert_eq!(resolve_actor(&identity, &keys), Actor::anonymous());
    }

    #[test]
    fn test_bearer_is_taken_before_cookie() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=cookie-token"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer header-token"));
        assert_eq!(
            Identity::from_request(None, &headers, &keys),
            Identity::FromCredential("header-token".into())
        );
    }
}
