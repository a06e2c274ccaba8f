use http::HeaderMap;

use crate::config::AuthConfig;
use crate::utils::{SameSite, UtilError, get_cookie_from_headers, header_clear_cookie, header_set_cookie};

/// Hand the auth token to the browser as a session cookie.
pub(crate) fn set_auth_token_cookie(
    config: &AuthConfig,
    headers: &mut HeaderMap,
    auth_token: &str,
    same_site: SameSite,
) -> Result<(), UtilError> {
    header_set_cookie(
        headers,
        &config.auth_token_cookie_name,
        auth_token,
        same_site,
        None,
    )?;
    Ok(())
}

/// Headers that expire the auth-token cookie. The token is not revoked upstream.
pub fn prepare_logout_response(config: &AuthConfig) -> Result<HeaderMap, UtilError> {
    let mut headers = HeaderMap::new();
    header_clear_cookie(&mut headers, &config.auth_token_cookie_name)?;
    Ok(headers)
}

/// The auth token presented by the browser, if any.
pub fn get_auth_token_from_headers(config: &AuthConfig, headers: &HeaderMap) -> Option<String> {
    get_cookie_from_headers(headers, &config.auth_token_cookie_name)
}
