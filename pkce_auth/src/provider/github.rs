use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ProfileResolver;
use super::errors::ProviderError;
use super::types::ProviderProfile;

const PROVIDER: &str = "github";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: Option<String>,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// Reads the GitHub profile from the REST API user endpoint.
///
/// GitHub omits `email` when the user keeps it private, in which case the
/// primary verified address is read from `{user_url}/emails`.
pub struct GitHubProfileResolver<'a> {
    client: &'a reqwest::Client,
    user_url: &'a Url,
    api_version: &'a str,
}

impl<'a> GitHubProfileResolver<'a> {
    pub fn new(client: &'a reqwest::Client, user_url: &'a Url, api_version: &'a str) -> Self {
        Self {
            client,
            user_url,
            api_version,
        }
    }

    fn emails_url(&self) -> Url {
        let mut url = self.user_url.clone();
        let path = format!("{}/emails", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        provider_token: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(provider_token)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", self.api_version)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        if response.status() != reqwest::StatusCode::OK {
            tracing::error!("GitHub request to {} failed: {}", url, response.status());
            return Err(ProviderError::Status {
                provider: PROVIDER,
                endpoint: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))
    }
}

fn primary_verified(emails: Vec<GitHubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}

#[async_trait]
impl ProfileResolver for GitHubProfileResolver<'_> {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, provider_token: &str) -> Result<ProviderProfile, ProviderError> {
        let user: GitHubUser = self.get_json(self.user_url.clone(), provider_token).await?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => {
                tracing::debug!("GitHub user has no public email, reading /user/emails");
                let emails: Vec<GitHubEmail> =
                    self.get_json(self.emails_url(), provider_token).await?;
                primary_verified(emails).ok_or(ProviderError::MissingField {
                    provider: PROVIDER,
                    field: "email",
                })?
            }
        };

        let name = user
            .name
            .filter(|n| !n.is_empty())
            .or(user.login.filter(|l| !l.is_empty()))
            .unwrap_or_else(|| email.clone());

        Ok(ProviderProfile {
            email,
            name,
            avatar_url: user.avatar_url.filter(|a| !a.is_empty()),
        })
    }
}
