use serde::{Deserialize, Serialize};

pub(crate) const GOOGLE_ISSUER: &str = "https://accounts.google.com";
pub(crate) const GITHUB_ISSUER: &str = "https://github.com";

/// The provider that authenticated an identity, keyed by its issuer URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issuer {
    Google,
    GitHub,
    Unsupported(String),
}

impl Issuer {
    pub fn from_url(issuer: &str) -> Self {
        match issuer.trim_end_matches('/') {
            GOOGLE_ISSUER => Self::Google,
            GITHUB_ISSUER => Self::GitHub,
            _ => Self::Unsupported(issuer.to_string()),
        }
    }

    pub fn as_url(&self) -> &str {
        match self {
            Self::Google => GOOGLE_ISSUER,
            Self::GitHub => GITHUB_ISSUER,
            Self::Unsupported(url) => url,
        }
    }
}

/// Normalized profile fields used to create the local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}
