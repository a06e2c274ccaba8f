use http::HeaderMap;

use crate::config::AuthConfig;
use crate::oauth2::errors::OAuth2Error;
use crate::utils::{SameSite, get_cookie_from_headers, header_clear_cookie, header_set_cookie};

/// Bind the verifier to the current browser with a short-lived cookie.
///
/// SameSite=Lax so the cookie still rides along on the top-level cross-site
/// redirect that brings the browser back to the callback.
pub(crate) fn store_verifier(
    config: &AuthConfig,
    headers: &mut HeaderMap,
    verifier: &str,
) -> Result<(), OAuth2Error> {
    header_set_cookie(
        headers,
        &config.verifier_cookie_name,
        verifier,
        SameSite::Lax,
        Some(config.verifier_cookie_max_age),
    )?;
    Ok(())
}

pub(crate) fn retrieve_verifier(
    config: &AuthConfig,
    request_headers: &HeaderMap,
) -> Result<String, OAuth2Error> {
    get_cookie_from_headers(request_headers, &config.verifier_cookie_name).ok_or_else(|| {
        tracing::warn!(
            "No '{}' cookie on callback request",
            config.verifier_cookie_name
        );
        OAuth2Error::VerifierNotFound
    })
}

pub(crate) fn clear_verifier_cookie(
    config: &AuthConfig,
    headers: &mut HeaderMap,
) -> Result<(), OAuth2Error> {
    header_clear_cookie(headers, &config.verifier_cookie_name)?;
    Ok(())
}
