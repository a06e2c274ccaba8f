use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use headers::{Cookie, HeaderMapExt};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// `SameSite` attribute for cookies written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
        }
    }
}

pub(crate) fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Fill `len` bytes from the system CSPRNG and return them base64url encoded.
pub fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(base64url_encode(&bytes))
}

/// Append a `Set-Cookie` header. Every cookie is `Secure; HttpOnly; Path=/`.
///
/// `max_age` of `None` produces a browser-session cookie.
pub(crate) fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    name: &str,
    value: &str,
    same_site: SameSite,
    max_age: Option<i64>,
) -> Result<&'a HeaderMap, UtilError> {
    if !value.bytes().all(is_cookie_octet) {
        return Err(UtilError::Cookie(format!(
            "Invalid character in value of cookie '{name}'"
        )));
    }
    let mut cookie = format!(
        "{name}={value}; SameSite={}; Secure; HttpOnly; Path=/",
        same_site.as_str()
    );
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

// RFC 6265 cookie-octet: visible ASCII except DQUOTE, comma, semicolon and backslash.
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// Expire a cookie previously written with [`header_set_cookie`].
pub(crate) fn header_clear_cookie<'a>(
    headers: &'a mut HeaderMap,
    name: &str,
) -> Result<&'a HeaderMap, UtilError> {
    header_set_cookie(headers, name, "", SameSite::Lax, Some(0))
}

/// Read a cookie value from request headers. Empty values count as absent.
pub(crate) fn get_cookie_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.typed_get::<Cookie>()?;
    cookies
        .get(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Build the shared outbound HTTP client.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, UtilError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| UtilError::HttpClient(e.to_string()))
}
