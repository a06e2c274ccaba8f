mod errors;
mod main;
mod types;

pub use errors::OAuth2Error;
pub use main::generate_pkce_pair;
#[cfg(test)]
pub(crate) use main::challenge_for;
pub use types::{CallbackParams, PkcePair, TokenResponse};

pub(crate) use main::{clear_verifier_cookie, exchange_code_for_token, retrieve_verifier, store_verifier};
