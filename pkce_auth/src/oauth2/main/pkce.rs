use sha2::{Digest, Sha256};

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::PkcePair;
use crate::utils::{base64url_encode, gen_random_string};

const VERIFIER_ENTROPY_BYTES: usize = 32;

/// Generate a fresh PKCE pair.
///
/// The verifier is 32 CSPRNG bytes, base64url encoded without padding. The
/// challenge is computed over the *encoded* verifier string, which is the form
/// the auth extension hashes again when it checks the exchange.
pub fn generate_pkce_pair() -> Result<PkcePair, OAuth2Error> {
    let verifier = gen_random_string(VERIFIER_ENTROPY_BYTES)?;
    let challenge = challenge_for(&verifier);
    tracing::debug!("PKCE challenge: {}", challenge);
    Ok(PkcePair {
        verifier,
        challenge,
    })
}

pub(crate) fn challenge_for(verifier: &str) -> String {
    base64url_encode(&Sha256::digest(verifier.as_bytes()))
}
