use std::sync::Arc;

use http::HeaderMap;
use http::header::{COOKIE, SET_COOKIE};
use pkce_auth::{AuthConfig, AuthContext, MemoryUserStore, UpstreamStore};
use url::Url;
use uuid::Uuid;

use super::mock_upstream::MockUpstream;

pub const AUTH_TOKEN: &str = "test-auth-token";
pub const PROVIDER_TOKEN: &str = "test-provider-token";
pub const VALID_CODE: &str = "valid-code";

pub const GOOGLE_ISSUER: &str = "https://accounts.google.com";
pub const GITHUB_ISSUER: &str = "https://github.com";

pub fn identity_id() -> Uuid {
    Uuid::parse_str("5f1b1d2e-8f3c-4c55-9d2a-0b3c7f1e2a44").unwrap()
}

/// Config whose every upstream URL points at the mock server.
pub fn mock_config(mock: &MockUpstream) -> AuthConfig {
    let mut config = AuthConfig::new(Url::parse(&format!("{}/ext/auth", mock.base_url)).unwrap());
    config.google_discovery_url =
        Url::parse(&format!("{}/google/.well-known/openid-configuration", mock.base_url)).unwrap();
    config.github_user_api_url = Url::parse(&format!("{}/github/user", mock.base_url)).unwrap();
    config
}

/// Context backed by an in-memory store that can see `identity_id()` as `issuer`.
pub async fn memory_context(mock: &MockUpstream, issuer: &str) -> (AuthContext, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    store.register_identity(identity_id(), issuer, AUTH_TOKEN).await;

    let dyn_store: Arc<dyn UpstreamStore> = store.clone();
    let ctx = AuthContext::new(mock_config(mock), dyn_store).unwrap();
    (ctx, store)
}

/// All `Set-Cookie` values in a response, as strings.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The value a browser would store for `name`, taken from the last `Set-Cookie`.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    set_cookies(headers).into_iter().rev().find_map(|cookie| {
        cookie
            .strip_prefix(&format!("{name}="))
            .and_then(|rest| rest.split(';').next())
            .map(str::to_string)
    })
}

/// Request headers carrying the cookies a browser would send back.
pub fn browser_request(cookies: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");
    headers.insert(COOKIE, value.parse().unwrap());
    headers
}

/// Run the sign-in redirect step and return the callback request headers a
/// browser would send, registering the challenge with the mock.
pub fn start_flow(ctx: &AuthContext, mock: &MockUpstream) -> HeaderMap {
    let (redirect_url, headers) = pkce_auth::prepare_signin_request(ctx).unwrap();
    let challenge = redirect_url
        .query_pairs()
        .find(|(k, _)| k == "challenge")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    mock.state.expect_challenge(&challenge);

    let verifier = cookie_value(&headers, &ctx.config.verifier_cookie_name).unwrap();
    browser_request(&[(ctx.config.verifier_cookie_name.as_str(), verifier.as_str())])
}
