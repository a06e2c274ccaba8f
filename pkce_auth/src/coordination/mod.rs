//! Flow coordination
//!
//! High-level entry points that tie the PKCE exchange, the upstream store and
//! the provider lookups together. The framework layer calls these and turns
//! their results into redirects.

mod errors;
mod flow;

pub use errors::CoordinationError;
pub use flow::{prepare_signin_request, signin_callback_core, signup_callback_core};
