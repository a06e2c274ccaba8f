use std::{env, sync::Arc};

use url::Url;

use crate::config::ConfigError;

use super::types::{EdgeqlHttpStore, MemoryUserStore, UpstreamStore};

/// Build the user store selected by `USER_STORE_TYPE`.
///
/// `edgeql` (default) needs `EDGEDB_HTTP_URL` and optionally takes
/// `EDGEDB_SECRET_KEY`. `memory` starts empty.
pub fn store_from_env(client: reqwest::Client) -> Result<Arc<dyn UpstreamStore>, ConfigError> {
    store_from_lookup(client, |key| env::var(key).ok())
}

pub fn store_from_lookup<F>(
    client: reqwest::Client,
    lookup: F,
) -> Result<Arc<dyn UpstreamStore>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let store_type = lookup("USER_STORE_TYPE").unwrap_or_else(|| "edgeql".to_string());
    tracing::info!("Initializing user store with type: {}", store_type);

    match store_type.as_str() {
        "edgeql" => {
            let raw = lookup("EDGEDB_HTTP_URL").ok_or(ConfigError::Missing("EDGEDB_HTTP_URL"))?;
            let endpoint = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                key: "EDGEDB_HTTP_URL",
                reason: e.to_string(),
            })?;
            let secret_key = lookup("EDGEDB_SECRET_KEY").filter(|s| !s.is_empty());
            Ok(Arc::new(EdgeqlHttpStore::new(client, endpoint, secret_key)))
        }
        "memory" => {
            tracing::warn!("In-memory user store only sees identities registered in-process");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        other => Err(ConfigError::Invalid {
            key: "USER_STORE_TYPE",
            reason: format!("unsupported store type '{other}', expected 'edgeql' or 'memory'"),
        }),
    }
}
