//! Error types for flow coordination

use thiserror::Error;

use crate::config::ConfigError;
use crate::oauth2::OAuth2Error;
use crate::provider::ProviderError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while running a sign-in, sign-up or sign-out flow
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Error from the PKCE flow and the token exchange
    #[error("OAuth2 error: {0}")]
    OAuth2Error(OAuth2Error),

    /// Error from the identity provider profile lookup
    #[error("Provider error: {0}")]
    ProviderError(ProviderError),

    /// Error from the upstream identity and user store
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),

    #[error("Config error: {0}")]
    ConfigError(ConfigError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::OAuth2Error(err) => tracing::error!("OAuth2 error: {}", err),
            Self::ProviderError(err) => tracing::error!("Provider error: {}", err),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
            Self::ConfigError(err) => tracing::error!("Config error: {}", err),
        }
        self
    }

    /// An outbound call ran out of time. Retrying the whole flow may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::OAuth2Error(OAuth2Error::Timeout(_))
                | Self::ProviderError(ProviderError::Timeout { .. })
                | Self::UserError(UserError::Timeout(_))
        )
    }

    /// Text that is safe to show the browser. Upstream bodies never appear here.
    pub fn public_message(&self) -> String {
        if self.is_retryable() {
            return "An upstream service timed out, please try again".to_string();
        }
        match self {
            Self::OAuth2Error(OAuth2Error::Provider(message)) => message.clone(),
            Self::OAuth2Error(OAuth2Error::MissingCode) => {
                "OAuth callback is missing 'code'".to_string()
            }
            Self::OAuth2Error(OAuth2Error::VerifierNotFound) => {
                "Could not find 'verifier' in the cookie store. Please restart sign-in".to_string()
            }
            Self::OAuth2Error(OAuth2Error::Utils(_)) | Self::UtilsError(_) | Self::ConfigError(_) => {
                "Internal server error".to_string()
            }
            Self::OAuth2Error(_) => "Failed to exchange the authorization code".to_string(),
            Self::ProviderError(ProviderError::UnsupportedIssuer(_)) => {
                "This identity provider is not supported".to_string()
            }
            Self::ProviderError(_) => "Failed to fetch the user profile".to_string(),
            Self::UserError(_) => "Failed to link the identity to a user".to_string(),
        }
    }
}

// Custom From implementations that automatically log errors

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        let error = Self::OAuth2Error(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<ProviderError> for CoordinationError {
    fn from(err: ProviderError) -> Self {
        let error = Self::ProviderError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<ConfigError> for CoordinationError {
    fn from(err: ConfigError) -> Self {
        let error = Self::ConfigError(err);
        tracing::error!("{}", error);
        error
    }
}
