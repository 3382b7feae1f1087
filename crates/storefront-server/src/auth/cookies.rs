//! Session cookie parsing and `Set-Cookie` rendering

use axum::http::{header, HeaderMap};

/// Attributes applied to the session cookie.
///
/// Production cookies are sent cross-site (`SameSite=None; Secure`) and can be
/// scoped to a parent domain. Development cookies stay first-party (`Lax`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub name: String,
    pub max_age_secs: u64,
    pub production: bool,
    pub domain: Option<String>,
}

impl CookiePolicy {
    /// `Set-Cookie` value storing `value` for the configured lifetime.
    pub fn set(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// `Set-Cookie` value that makes the browser drop the session.
    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!("{}={}; Path=/; Max-Age={}; HttpOnly", self.name, value, max_age);
        if self.production {
            cookie.push_str("; SameSite=None; Secure");
            if let Some(ref domain) = self.domain {
                cookie.push_str("; Domain=");
                cookie.push_str(domain);
            }
        } else {
            cookie.push_str("; SameSite=Lax");
        }
        cookie
    }
}

/// Find `name` in a single `Cookie` header value (`a=1; b=2`).
pub fn find_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}

/// Non-empty value of cookie `name` across every `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| find_cookie(raw, name))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn policy(production: bool, domain: Option<&str>) -> CookiePolicy {
        CookiePolicy {
            name: "auth_token".to_string(),
            max_age_secs: 604800,
            production,
            domain: domain.map(str::to_string),
        }
    }

    #[test]
    fn test_development_cookie_attributes() {
        let cookie = policy(false, Some(".example.com")).set("abc");
        assert_eq!(cookie, "auth_token=abc; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax");
    }

    #[test]
    fn test_production_cookie_attributes() {
        let cookie = policy(true, Some(".example.com")).set("abc");
        assert_eq!(
            cookie,
            "auth_token=abc; Path=/; Max-Age=604800; HttpOnly; SameSite=None; Secure; Domain=.example.com"
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = policy(true, None).clear();
        assert!(cookie.starts_with("auth_token=; Path=/; Max-Age=0"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_find_cookie() {
        let raw = "theme=dark; auth_token=tok.en.sig ; lang=it";
        assert_eq!(find_cookie(raw, "auth_token"), Some("tok.en.sig"));
        assert_eq!(find_cookie(raw, "lang"), Some("it"));
        assert_eq!(find_cookie(raw, "missing"), None);
        assert_eq!(find_cookie("auth_token_old=x", "auth_token"), None);
    }

    #[test]
    fn test_cookie_value_scans_all_headers_and_skips_empty() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("auth_token=abc"));
        assert_eq!(cookie_value(&headers, "auth_token").as_deref(), Some("abc"));

        let mut cleared = HeaderMap::new();
        cleared.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(cookie_value(&cleared, "auth_token"), None);
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
