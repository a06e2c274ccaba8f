use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::ProfileResolver;
use super::discovery::fetch_oidc_discovery;
use super::errors::ProviderError;
use super::types::{GOOGLE_ISSUER, ProviderProfile};

const PROVIDER: &str = "google";

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl GoogleUserInfo {
    fn into_profile(self) -> Result<ProviderProfile, ProviderError> {
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .ok_or(ProviderError::MissingField {
                provider: PROVIDER,
                field: "email",
            })?;
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(ProviderProfile {
            email,
            name,
            avatar_url: self.picture.filter(|p| !p.is_empty()),
        })
    }
}

/// Reads the Google profile through the userinfo endpoint advertised by discovery.
pub struct GoogleProfileResolver<'a> {
    client: &'a reqwest::Client,
    discovery_url: &'a Url,
}

impl<'a> GoogleProfileResolver<'a> {
    pub fn new(client: &'a reqwest::Client, discovery_url: &'a Url) -> Self {
        Self {
            client,
            discovery_url,
        }
    }
}

#[async_trait]
impl ProfileResolver for GoogleProfileResolver<'_> {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, provider_token: &str) -> Result<ProviderProfile, ProviderError> {
        let discovery =
            fetch_oidc_discovery(self.client, PROVIDER, self.discovery_url, GOOGLE_ISSUER).await?;

        let response = self
            .client
            .get(&discovery.userinfo_endpoint)
            .bearer_auth(provider_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        if response.status() != reqwest::StatusCode::OK {
            tracing::error!("Google userinfo request failed: {}", response.status());
            return Err(ProviderError::Status {
                provider: PROVIDER,
                endpoint: discovery.userinfo_endpoint,
                status: response.status().as_u16(),
            });
        }

        let user_info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        user_info.into_profile()
    }
}
