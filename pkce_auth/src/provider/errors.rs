use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    #[error("Unsupported identity issuer: {0}")]
    UnsupportedIssuer(String),

    #[error("{provider} request timed out: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned status {status} for {endpoint}")]
    Status {
        provider: &'static str,
        endpoint: String,
        status: u16,
    },

    #[error("Failed to decode {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    #[error("Issuer mismatch: discovered={0}, expected={1}")]
    IssuerMismatch(String, String),

    #[error("{provider} profile has no usable {field}")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },
}

impl ProviderError {
    pub(crate) fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider,
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                provider,
                message: err.to_string(),
            }
        } else {
            Self::Request {
                provider,
                message: err.to_string(),
            }
        }
    }
}
