use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("Identity {0} is not visible to this session")]
    IdentityNotFound(Uuid),

    #[error("Upstream store request timed out: {0}")]
    Timeout(String),

    #[error("Upstream store request failed: {0}")]
    Request(String),

    #[error("Upstream store error: {0}")]
    Upstream(String),

    #[error("Invalid data: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        UserError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for UserError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UserError::Timeout(err.to_string())
        } else if err.is_decode() {
            UserError::Decode(err.to_string())
        } else {
            UserError::Request(err.to_string())
        }
    }
}
