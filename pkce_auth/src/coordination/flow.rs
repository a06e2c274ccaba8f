use http::HeaderMap;
use url::Url;

use crate::context::AuthContext;
use crate::oauth2::{
    CallbackParams, OAuth2Error, TokenResponse, clear_verifier_cookie, exchange_code_for_token,
    generate_pkce_pair, retrieve_verifier, store_verifier,
};
use crate::provider::profile_resolver_for;
use crate::session::set_auth_token_cookie;
use crate::userdb::{LinkOutcome, NewUser, create_user, find_linked_user, resolve_issuer};
use crate::utils::SameSite;

use super::errors::CoordinationError;

/// Start a flow: mint a PKCE pair, bind the verifier to the browser and
/// return the hosted sign-up page URL carrying the challenge.
pub fn prepare_signin_request(ctx: &AuthContext) -> Result<(Url, HeaderMap), CoordinationError> {
    let pkce = generate_pkce_pair()?;

    let mut headers = HeaderMap::new();
    store_verifier(&ctx.config, &mut headers, &pkce.verifier)?;

    let mut redirect_url = ctx.config.auth_endpoint("ui/signup");
    redirect_url
        .query_pairs_mut()
        .append_pair("challenge", &pkce.challenge);

    tracing::debug!("Redirecting to hosted sign-up page: {}", redirect_url);
    Ok((redirect_url, headers))
}

/// Finish a plain sign-in. The auth-token cookie is `SameSite=Strict`.
///
/// Cookies are written to `response_headers` as soon as they are known, so
/// they should be returned to the browser even when this fails.
#[tracing::instrument(skip_all)]
pub async fn signin_callback_core(
    ctx: &AuthContext,
    params: &CallbackParams,
    request_headers: &HeaderMap,
    response_headers: &mut HeaderMap,
) -> Result<(), CoordinationError> {
    let token = complete_code_exchange(
        ctx,
        params,
        request_headers,
        response_headers,
        SameSite::Strict,
    )
    .await?;

    tracing::info!(identity_id = %token.identity_id, "Sign-in completed");
    Ok(())
}

/// Finish a sign-up: exchange the code, then make sure the identity has a user.
///
/// An identity that already has a user is left alone, so running the same
/// sign-up twice writes one user.
#[tracing::instrument(skip_all)]
pub async fn signup_callback_core(
    ctx: &AuthContext,
    params: &CallbackParams,
    request_headers: &HeaderMap,
    response_headers: &mut HeaderMap,
) -> Result<LinkOutcome, CoordinationError> {
    let token = complete_code_exchange(
        ctx,
        params,
        request_headers,
        response_headers,
        SameSite::Lax,
    )
    .await?;
    let store = ctx.store.as_ref();

    let issuer = resolve_issuer(store, &token.auth_token, token.identity_id).await?;
    let resolver = profile_resolver_for(&issuer, &ctx.http, &ctx.config)?;

    if let Some(user_id) = find_linked_user(store, &token.auth_token, token.identity_id).await? {
        tracing::info!(
            identity_id = %token.identity_id,
            user_id = %user_id,
            "Identity already linked, skipping user creation"
        );
        return Ok(LinkOutcome::AlreadyLinked { user_id });
    }

    tracing::debug!(provider = resolver.provider(), "Fetching provider profile");
    let profile = resolver.fetch(&token.provider_token).await?;

    let new_user = NewUser::from_profile(profile, token.identity_id);
    let outcome = create_user(store, &token.auth_token, &new_user).await?;

    tracing::info!(
        identity_id = %token.identity_id,
        user_id = %outcome.user_id(),
        provider = resolver.provider(),
        "Sign-up completed"
    );
    Ok(outcome)
}

async fn complete_code_exchange(
    ctx: &AuthContext,
    params: &CallbackParams,
    request_headers: &HeaderMap,
    response_headers: &mut HeaderMap,
    same_site: SameSite,
) -> Result<TokenResponse, CoordinationError> {
    let code = match params.code.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => code,
        None => {
            return Err(match params.error.as_deref().filter(|e| !e.is_empty()) {
                Some(error) => OAuth2Error::Provider(error.to_string()),
                None => OAuth2Error::MissingCode,
            }
            .into());
        }
    };

    let verifier = retrieve_verifier(&ctx.config, request_headers)?;
    clear_verifier_cookie(&ctx.config, response_headers)?;

    let token = exchange_code_for_token(&ctx.http, &ctx.config, code, &verifier).await?;
    set_auth_token_cookie(&ctx.config, response_headers, &token.auth_token, same_site)?;

    Ok(token)
}
