//! Client metadata captured with each audit record

use std::net::SocketAddr;

use axum::http::{header, HeaderMap, HeaderValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// IP is the first `X-Forwarded-For` hop, else the peer address.
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded = headers
            .get("x-forwarded-for")
            .map(lossy)
            .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
            .filter(|ip| !ip.is_empty());

        let user_agent = headers
            .get(header::USER_AGENT)
            .map(lossy)
            .filter(|ua| !ua.is_empty());

        Self {
            ip: forwarded.or_else(|| peer.map(|addr| addr.ip().to_string())),
            user_agent,
        }
    }
}

/// Header text with invalid UTF-8 replaced rather than dropped.
fn lossy(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}
