use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::{env, net::SocketAddr, path::PathBuf};
use tokio::task::JoinHandle;

#[derive(Clone, Copy)]
pub(crate) struct Ports {
    pub(crate) http: u16,
    pub(crate) https: u16,
}

impl Ports {
    /// `PORT` and `PORT_HTTPS`, defaulting to 3001 and 3443.
    pub(crate) fn from_env() -> Result<Self, std::num::ParseIntError> {
        let port = |key: &str, default: u16| match env::var(key) {
            Ok(value) => value.parse(),
            Err(_) => Ok(default),
        };
        Ok(Self {
            http: port("PORT", 3001)?,
            https: port("PORT_HTTPS", 3443)?,
        })
    }
}

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        if let Err(e) = axum_server::bind(addr).serve(app.into_make_service()).await {
            tracing::error!("HTTP server error: {}", e);
        }
    })
}

/// Serve over TLS with the PEM files named by `TLS_CERT_PATH` and `TLS_KEY_PATH`,
/// defaulting to `self_signed_certs/{cert,key}.pem` in the crate directory.
pub(crate) async fn spawn_https_server(
    port: u16,
    app: Router,
) -> Result<JoinHandle<()>, std::io::Error> {
    let certs = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("self_signed_certs");
    let cert = env::var("TLS_CERT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| certs.join("cert.pem"));
    let key = env::var("TLS_KEY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| certs.join("key.pem"));

    let config = RustlsConfig::from_pem_file(cert, key).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HTTPS server listening on {}", addr);
    Ok(tokio::spawn(async move {
        if let Err(e) = axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
        {
            tracing::error!("HTTPS server error: {}", e);
        }
    }))
}
