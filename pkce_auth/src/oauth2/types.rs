use std::fmt;

use serde::Deserialize;
use uuid::Uuid;

/// A PKCE verifier and the S256 challenge derived from it.
#[derive(Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl fmt::Debug for PkcePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkcePair")
            .field("verifier", &"[redacted]")
            .field("challenge", &self.challenge)
            .finish()
    }
}

/// Query parameters of the callback redirect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Body returned by the auth extension's `/token` endpoint.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
    pub identity_id: Uuid,
    pub provider_token: String,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("auth_token", &"[redacted]")
            .field("identity_id", &self.identity_id)
            .field("provider_token", &"[redacted]")
            .finish()
    }
}
