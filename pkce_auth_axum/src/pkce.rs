use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::get,
};

use pkce_auth::{
    AuthContext, CallbackParams, LinkOutcome, prepare_logout_response, prepare_signin_request,
    signin_callback_core, signup_callback_core,
};

use super::error::IntoResponseError;

pub(super) fn router() -> Router<Arc<AuthContext>> {
    Router::new()
        .route("/signin", get(signin))
        .route("/callback", get(callback))
        .route("/callback/signup", get(callback_signup))
        .route("/signout", get(signout))
}

async fn signin(
    State(ctx): State<Arc<AuthContext>>,
) -> Result<(HeaderMap, Redirect), (StatusCode, String)> {
    let (redirect_url, headers) = prepare_signin_request(&ctx).into_response_error()?;
    Ok((headers, Redirect::temporary(redirect_url.as_str())))
}

/// Plain sign-in callback.
///
/// Cookies written before a failure (the cleared verifier, the auth token)
/// are sent along with the error response.
async fn callback(
    State(ctx): State<Arc<AuthContext>>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Redirect), (StatusCode, HeaderMap, String)> {
    let mut response_headers = HeaderMap::new();
    match signin_callback_core(&ctx, &params, &headers, &mut response_headers)
        .await
        .into_response_error()
    {
        Ok(()) => Ok((response_headers, Redirect::permanent(&ctx.config.home_url))),
        Err((status, message)) => Err((status, response_headers, message)),
    }
}

async fn callback_signup(
    State(ctx): State<Arc<AuthContext>>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Redirect), (StatusCode, HeaderMap, String)> {
    let mut response_headers = HeaderMap::new();
    match signup_callback_core(&ctx, &params, &headers, &mut response_headers)
        .await
        .into_response_error()
    {
        Ok(outcome) => {
            if let LinkOutcome::AlreadyLinked { user_id } = outcome {
                tracing::debug!(user_id = %user_id, "Sign-up callback for a linked identity");
            }
            Ok((response_headers, Redirect::permanent(&ctx.config.home_url)))
        }
        Err((status, message)) => Err((status, response_headers, message)),
    }
}

async fn signout(
    State(ctx): State<Arc<AuthContext>>,
) -> Result<(HeaderMap, Redirect), (StatusCode, String)> {
    let headers = prepare_logout_response(&ctx.config)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok((headers, Redirect::temporary(&ctx.config.home_url)))
}
