use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    /// The identity provider reported a failure; the message is its own.
    #[error("{0}")]
    Provider(String),

    #[error("Callback is missing the authorization code")]
    MissingCode,

    #[error(
        "PKCE verifier cookie not found; the callback did not come from the browser that started the flow"
    )]
    VerifierNotFound,

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Token exchange timed out: {0}")]
    Timeout(String),

    #[error("Token exchange request failed: {0}")]
    Request(String),

    #[error("Failed to decode token response: {0}")]
    Decode(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl From<reqwest::Error> for OAuth2Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
