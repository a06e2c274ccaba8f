mod cookie;
mod exchange;
mod pkce;

pub use pkce::generate_pkce_pair;
#[cfg(test)]
pub(crate) use pkce::challenge_for;

pub(crate) use cookie::{clear_verifier_cookie, retrieve_verifier, store_verifier};
pub(crate) use exchange::exchange_code_for_token;
