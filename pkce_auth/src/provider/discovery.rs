use serde::Deserialize;
use url::Url;

use super::errors::ProviderError;

/// The parts of an OpenID Connect discovery document this crate reads.
/// https://openid.net/specs/openid-connect-discovery-1_0.html
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OidcDiscoveryDocument {
    /// The issuer identifier for the OpenID Provider
    pub(crate) issuer: String,
    /// URL of the UserInfo Endpoint
    pub(crate) userinfo_endpoint: String,
}

/// Fetch a discovery document and check that it belongs to `expected_issuer`.
///
/// The userinfo endpoint is read from the document on every call instead of
/// being hardcoded, since providers reserve the right to move it.
pub(crate) async fn fetch_oidc_discovery(
    client: &reqwest::Client,
    provider: &'static str,
    discovery_url: &Url,
    expected_issuer: &str,
) -> Result<OidcDiscoveryDocument, ProviderError> {
    tracing::debug!("Fetching OIDC discovery from: {}", discovery_url);

    let response = client
        .get(discovery_url.clone())
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e))?;

    if response.status() != reqwest::StatusCode::OK {
        tracing::error!("OIDC discovery failed with status: {}", response.status());
        return Err(ProviderError::Status {
            provider,
            endpoint: discovery_url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let document: OidcDiscoveryDocument = response
        .json()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e))?;

    if document.issuer.trim_end_matches('/') != expected_issuer {
        tracing::error!(
            "Issuer mismatch in discovery document. Expected: {}, Found: {}",
            expected_issuer,
            document.issuer
        );
        return Err(ProviderError::IssuerMismatch(
            document.issuer,
            expected_issuer.to_string(),
        ));
    }

    tracing::debug!("Userinfo endpoint: {}", document.userinfo_endpoint);
    Ok(document)
}
