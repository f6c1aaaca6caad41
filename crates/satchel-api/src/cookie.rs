//! Session cookie parsing and `Set-Cookie` values

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};

use satchel_core::Session;

use crate::error::ApiError;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The session token from the request's `Cookie` headers.
    ///
    /// Empty or malformed values count as absent.
    pub fn extract<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .and_then(|(_, value)| {
                let value = unquote(value.trim());
                is_valid_cookie_value(value).then_some(value)
            })
    }

    /// `Set-Cookie` value carrying the session token until it expires.
    pub fn issue(&self, session: &Session) -> Result<HeaderValue, ApiError> {
        let expires = session
            .expires_at_utc()
            .ok_or_else(|| ApiError::InternalError("session expiry out of range".into()))?;
        self.header_value(&session.token, &http_date(expires), None)
    }

    /// `Set-Cookie` value that makes the browser drop the session cookie.
    pub fn clear(&self) -> Result<HeaderValue, ApiError> {
        self.header_value("", EPOCH_HTTP_DATE, Some(0))
    }

    fn header_value(
        &self,
        value: &str,
        expires: &str,
        max_age: Option<i64>,
    ) -> Result<HeaderValue, ApiError> {
        let mut cookie = format!("{}={}; Path=/; Expires={}", self.name, value, expires);
        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        cookie.push_str("; HttpOnly; SameSite=Lax");

        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::InternalError(format!("invalid Set-Cookie header: {}", e)))
    }
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE).to_string()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// RFC 6265 cookie-octets, non-empty.
fn is_valid_cookie_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}
