//! Router for the PKCE sign-in endpoints

use std::sync::Arc;

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use pkce_auth::AuthContext;

/// Create the router for the sign-in endpoints
///
/// Mount it under [`pkce_auth::PKCE_ROUTE_PREFIX`]. The endpoints will be available at:
/// - {PKCE_ROUTE_PREFIX}/signin
/// - {PKCE_ROUTE_PREFIX}/callback
/// - {PKCE_ROUTE_PREFIX}/callback/signup
/// - {PKCE_ROUTE_PREFIX}/signout
///
/// The auth extension must be configured to redirect back to the callback URLs.
pub fn pkce_auth_router(ctx: Arc<AuthContext>) -> Router {
    pkce_auth_router_no_trace(ctx).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Create the router for the sign-in endpoints without HTTP tracing
///
/// This is the same as `pkce_auth_router()` but without the HTTP tracing middleware.
/// Use this if you want to add your own tracing middleware or if you don't need HTTP request tracing.
pub fn pkce_auth_router_no_trace(ctx: Arc<AuthContext>) -> Router {
    super::pkce::router().with_state(ctx)
}
