use std::sync::Arc;

use crate::config::AuthConfig;
use crate::coordination::CoordinationError;
use crate::userdb::{UpstreamStore, store_from_env};
use crate::utils::{UtilError, build_http_client};

/// Everything a flow needs, built once at startup and shared across requests.
#[derive(Clone)]
pub struct AuthContext {
    pub config: AuthConfig,
    /// Pooled client for the auth extension and the providers
    pub http: reqwest::Client,
    pub store: Arc<dyn UpstreamStore>,
}

impl AuthContext {
    pub fn new(config: AuthConfig, store: Arc<dyn UpstreamStore>) -> Result<Self, UtilError> {
        let http = build_http_client(config.outbound_timeout)?;
        Ok(Self::with_client(config, http, store))
    }

    pub fn with_client(
        config: AuthConfig,
        http: reqwest::Client,
        store: Arc<dyn UpstreamStore>,
    ) -> Self {
        Self {
            config,
            http,
            store,
        }
    }

    /// Read the config and the store selection from the environment.
    pub fn from_env() -> Result<Self, CoordinationError> {
        let config = AuthConfig::from_env()?;
        let http = build_http_client(config.outbound_timeout)?;
        let store = store_from_env(http.clone())?;

        tracing::info!(
            auth_base_url = %config.auth_base_url,
            "Auth context initialized"
        );
        Ok(Self::with_client(config, http, store))
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
