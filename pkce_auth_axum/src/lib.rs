//! pkce_auth_axum - Axum integration for the pkce-auth library
//!
//! Provides the router that serves the sign-in, callback and sign-out
//! endpoints, the mapping from flow errors to HTTP responses and an
//! [`AuthToken`] extractor for application handlers.

mod error;
mod pkce;
mod router;
mod session;

pub use error::{IntoResponseError, status_for};
pub use router::{pkce_auth_router, pkce_auth_router_no_trace};
pub use session::{AuthRedirect, AuthToken};

// Re-export the context and route prefix from the pkce_auth crate
pub use pkce_auth::{AuthContext, PKCE_ROUTE_PREFIX};
