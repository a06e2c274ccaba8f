//! pkce_auth - server side of the OAuth2 authorization code flow with PKCE
//!
//! Sign-in is delegated to the hosted UI of the Gel/EdgeDB auth extension.
//! This crate mints the PKCE pair, correlates the callback with the browser
//! that started the flow, exchanges the code for an auth token and, on
//! sign-up, links the new identity to a `User` built from the provider
//! profile. It is framework independent and speaks `http::HeaderMap`.

mod config;
mod context;
mod coordination;
mod oauth2;
mod provider;
mod session;
mod userdb;
mod utils;

pub use config::{AuthConfig, ConfigError, PKCE_ROUTE_PREFIX};
pub use context::AuthContext;

pub use coordination::{
    CoordinationError, prepare_signin_request, signin_callback_core, signup_callback_core,
};

pub use oauth2::{CallbackParams, OAuth2Error, PkcePair, TokenResponse, generate_pkce_pair};

pub use provider::{
    GitHubProfileResolver, GoogleProfileResolver, Issuer, ProfileResolver, ProviderError,
    ProviderProfile, profile_resolver_for,
};

pub use session::{get_auth_token_from_headers, prepare_logout_response};

pub use userdb::{
    EdgeqlHttpStore, Identity, LinkOutcome, MemoryUserStore, NewUser, UpstreamStore, User,
    UserError, store_from_env, store_from_lookup,
};

pub use utils::UtilError;
