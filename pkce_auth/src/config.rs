//! Central configuration for the pkce_auth crate

use std::{env, sync::LazyLock, time::Duration};

use thiserror::Error;
use url::Url;

/// Route prefix under which the sign-in, callback and sign-out endpoints are mounted.
/// Default: "/auth"
pub static PKCE_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("PKCE_ROUTE_PREFIX").unwrap_or_else(|_| "/auth".to_string()));

pub(crate) const DEFAULT_GOOGLE_DISCOVERY_URL: &str =
    "https://accounts.google.com/.well-known/openid-configuration";
pub(crate) const DEFAULT_GITHUB_USER_API_URL: &str = "https://api.github.com/user";
pub(crate) const DEFAULT_GITHUB_API_VERSION: &str = "2022-11-28";

// "__Host-" prefix makes the cookies host-only; it requires Secure and Path=/.
const DEFAULT_VERIFIER_COOKIE_NAME: &str = "__Host-PkceVerifier";
const DEFAULT_AUTH_TOKEN_COOKIE_NAME: &str = "__Host-AuthToken";
const DEFAULT_VERIFIER_COOKIE_MAX_AGE: i64 = 600;
const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings for the PKCE flow.
///
/// Built once at startup and carried inside [`crate::AuthContext`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the auth extension, e.g. `http://localhost:10701/branch/main/ext/auth`.
    pub auth_base_url: Url,
    pub verifier_cookie_name: String,
    /// Seconds, always positive.
    pub verifier_cookie_max_age: i64,
    pub auth_token_cookie_name: String,
    /// Where the browser lands after a completed flow or sign-out.
    pub home_url: String,
    pub outbound_timeout: Duration,
    pub google_discovery_url: Url,
    pub github_user_api_url: Url,
    pub github_api_version: String,
}

impl AuthConfig {
    /// Build a config with defaults for everything except the auth base URL.
    pub fn new(auth_base_url: Url) -> Self {
        Self {
            auth_base_url,
            verifier_cookie_name: DEFAULT_VERIFIER_COOKIE_NAME.to_string(),
            verifier_cookie_max_age: DEFAULT_VERIFIER_COOKIE_MAX_AGE,
            auth_token_cookie_name: DEFAULT_AUTH_TOKEN_COOKIE_NAME.to_string(),
            home_url: "/".to_string(),
            outbound_timeout: Duration::from_secs(DEFAULT_OUTBOUND_TIMEOUT_SECS),
            google_discovery_url: Url::parse(DEFAULT_GOOGLE_DISCOVERY_URL)
                .expect("default Google discovery URL is valid"),
            github_user_api_url: Url::parse(DEFAULT_GITHUB_USER_API_URL)
                .expect("default GitHub user URL is valid"),
            github_api_version: DEFAULT_GITHUB_API_VERSION.to_string(),
        }
    }

    /// Read the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("EDGEDB_AUTH_BASE_URL").ok_or(ConfigError::Missing("EDGEDB_AUTH_BASE_URL"))?;
        let mut config = Self::new(parse_url("EDGEDB_AUTH_BASE_URL", &base)?);

        if let Some(name) = lookup("PKCE_VERIFIER_COOKIE_NAME") {
            config.verifier_cookie_name = name;
        }
        if let Some(max_age) = lookup("PKCE_VERIFIER_COOKIE_MAX_AGE") {
            config.verifier_cookie_max_age = parse_max_age("PKCE_VERIFIER_COOKIE_MAX_AGE", &max_age)?;
        }
        if let Some(name) = lookup("AUTH_TOKEN_COOKIE_NAME") {
            config.auth_token_cookie_name = name;
        }
        if let Some(home) = lookup("PKCE_REDIRECT_HOME") {
            validate_home_url("PKCE_REDIRECT_HOME", &home)?;
            config.home_url = home;
        }
        if let Some(prefix) = lookup("PKCE_ROUTE_PREFIX") {
            validate_route_prefix("PKCE_ROUTE_PREFIX", &prefix)?;
        }
        if let Some(secs) = lookup("OUTBOUND_HTTP_TIMEOUT_SECS") {
            let secs = parse_u64("OUTBOUND_HTTP_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "OUTBOUND_HTTP_TIMEOUT_SECS",
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.outbound_timeout = Duration::from_secs(secs);
        }
        if let Some(url) = lookup("GOOGLE_DISCOVERY_URL") {
            config.google_discovery_url = parse_url("GOOGLE_DISCOVERY_URL", &url)?;
        }
        if let Some(url) = lookup("GITHUB_USER_API_URL") {
            config.github_user_api_url = parse_url("GITHUB_USER_API_URL", &url)?;
        }
        if let Some(version) = lookup("GITHUB_API_VERSION") {
            config.github_api_version = version;
        }

        if config.verifier_cookie_name == config.auth_token_cookie_name {
            return Err(ConfigError::Invalid {
                key: "AUTH_TOKEN_COOKIE_NAME",
                reason: "must differ from PKCE_VERIFIER_COOKIE_NAME".to_string(),
            });
        }

        Ok(config)
    }

    /// Resolve an endpoint below the auth base URL, e.g. `ui/signup` or `token`.
    pub(crate) fn auth_endpoint(&self, path: &str) -> Url {
        let mut url = self.auth_base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            key,
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("expected a non-negative integer, got '{value}'"),
    })
}

// `Max-Age` is signed on the wire; zero or below deletes the cookie at once.
fn parse_max_age(key: &'static str, value: &str) -> Result<i64, ConfigError> {
    let seconds = i64::try_from(parse_u64(key, value)?).map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("out of range: '{value}'"),
    })?;
    if seconds == 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(seconds)
}

// Written verbatim into the `Location` header of every redirect.
fn validate_home_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid {
            key,
            reason: "must not be empty".to_string(),
        });
    }
    http::HeaderValue::from_str(value).map_err(|_| ConfigError::Invalid {
        key,
        reason: "not a valid header value".to_string(),
    })?;
    Ok(())
}

/// Check a route prefix the endpoints can be nested under.
///
/// It must start with `/` and must not be the root itself.
fn validate_route_prefix(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || value.trim_end_matches('/').is_empty() {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("expected a non-root path starting with '/', got '{value}'"),
        });
    }
    Ok(())
}
