//! Request-side inputs of the audit recorder

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::request::Parts,
};

use super::client::ClientInfo;
use super::identity::Identity;
use crate::auth::{AuthenticatedUser, SessionKeys};

/// Everything the recorder needs from the originating request, captured
/// before the handler consumes it.
///
/// Extracting it never fails, so handlers can take it on public routes too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub identity: Identity,
    pub client: ClientInfo,
}

impl AuditContext {
    pub fn new(identity: Identity, client: ClientInfo) -> Self {
        Self { identity, client }
    }

    /// No identity and no client metadata.
    pub fn anonymous() -> Self {
        Self::new(Identity::Anonymous, ClientInfo::default())
    }

    pub fn from_parts(parts: &Parts, keys: &SessionKeys) -> Self {
        let attached = parts.extensions.get::<AuthenticatedUser>();
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Self {
            identity: Identity::from_request(attached, &parts.headers, keys),
            client: ClientInfo::from_request(&parts.headers, peer),
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuditContext
where
    SessionKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        Ok(Self::from_parts(parts, &keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::test_support::keys;
    use axum::http::{header, Request};

    #[test]
    fn test_captures_attached_user_and_client() {
        let mut request = Request::get("/api/brands")
            .header(header::USER_AGENT, "Mozilla/5.0")
            .header("x-forwarded-for", "198.51.100.4")
            .body(())
            .unwrap();
        request.extensions_mut().insert(AuthenticatedUser {
            id: Some(2),
            email: Some("ops@shop.it".into()),
        });
        let (parts, _) = request.into_parts();

        let ctx = AuditContext::from_parts(&parts, &keys());
        assert!(matches!(ctx.identity, Identity::Attached(_)));
        assert_eq!(ctx.client.ip.as_deref(), Some("198.51.100.4"));
        assert_eq!(ctx.client.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_uses_peer_address() {
        let mut request = Request::get("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo("192.0.2.10:4000".parse::<SocketAddr>().unwrap()));
        let (parts, _) = request.into_parts();

        let ctx = AuditContext::from_parts(&parts, &keys());
        assert_eq!(ctx.identity, Identity::Anonymous);
        assert_eq!(ctx.client.ip.as_deref(), Some("192.0.2.10"));
    }
}
