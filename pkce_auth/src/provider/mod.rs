//! Provider profile resolution
//!
//! After the code exchange the auth extension hands back the provider's own
//! access token. This module turns that token into a normalized
//! [`ProviderProfile`] by calling the provider that issued the identity.
//! Only Google and GitHub are supported; every other issuer is rejected.

mod discovery;
mod errors;
mod github;
mod google;
mod types;

use async_trait::async_trait;

use crate::config::AuthConfig;

pub use errors::ProviderError;
pub use github::GitHubProfileResolver;
pub use google::GoogleProfileResolver;
pub use types::{Issuer, ProviderProfile};

/// Fetches the profile of the user who owns a provider access token.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    /// Provider name used in logs and errors.
    fn provider(&self) -> &'static str;

    async fn fetch(&self, provider_token: &str) -> Result<ProviderProfile, ProviderError>;
}

/// Pick the resolver for an issuer. Unsupported issuers are an error.
pub fn profile_resolver_for<'a>(
    issuer: &Issuer,
    client: &'a reqwest::Client,
    config: &'a AuthConfig,
) -> Result<Box<dyn ProfileResolver + 'a>, ProviderError> {
    match issuer {
        Issuer::Google => Ok(Box::new(GoogleProfileResolver::new(
            client,
            &config.google_discovery_url,
        ))),
        Issuer::GitHub => Ok(Box::new(GitHubProfileResolver::new(
            client,
            &config.github_user_api_url,
            &config.github_api_version,
        ))),
        Issuer::Unsupported(url) => Err(ProviderError::UnsupportedIssuer(url.clone())),
    }
}
