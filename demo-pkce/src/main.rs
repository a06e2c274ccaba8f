use std::sync::Arc;

use axum::{Router, routing::get};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pkce_auth_axum::{AuthContext, PKCE_ROUTE_PREFIX, pkce_auth_router};

mod handlers;
mod server;

use crate::{
    handlers::{index, protected},
    server::{Ports, spawn_http_server, spawn_https_server},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install default CryptoProvider for rustls to prevent:
    // "no process-level CryptoProvider available -- call CryptoProvider::install_default() before this point"
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install default CryptoProvider")?;

    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,pkce_auth=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = Arc::new(AuthContext::from_env()?);

    let app = Router::new()
        .route("/", get(index))
        .route("/protected", get(protected))
        .with_state(ctx.clone())
        .nest(PKCE_ROUTE_PREFIX.as_str(), pkce_auth_router(ctx));

    let ports = Ports::from_env()?;

    let http_server = spawn_http_server(ports.http, app.clone());
    match spawn_https_server(ports.https, app).await {
        Ok(https_server) => {
            tokio::try_join!(http_server, https_server)?;
        }
        Err(e) => {
            tracing::warn!("HTTPS disabled: {}", e);
            http_server.await?;
        }
    }
    Ok(())
}
