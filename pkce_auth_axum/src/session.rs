use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use http::{Method, StatusCode, request::Parts};

use pkce_auth::{AuthContext, get_auth_token_from_headers};

/// Rejection for requests without an auth token: GET is sent home, anything
/// else gets 401.
pub struct AuthRedirect {
    method: Method,
    home_url: String,
}

impl AuthRedirect {
    fn new(method: Method, home_url: &str) -> Self {
        Self {
            method,
            home_url: home_url.to_string(),
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", self.home_url);
            Redirect::temporary(&self.home_url).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// The auth token cookie of the current browser, available as an Axum extractor
///
/// Only presence is checked here. The token is opaque to this service and is
/// validated by the database whenever it is used as the client token.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{routing::get, Router};
/// use pkce_auth::AuthContext;
/// use pkce_auth_axum::AuthToken;
///
/// async fn protected_handler(token: AuthToken) -> String {
///     format!("Signed in ({} byte token)", token.0.len())
/// }
///
/// fn app(ctx: Arc<AuthContext>) -> Router {
///     Router::new()
///         .route("/protected", get(protected_handler))
///         .with_state(ctx)
/// }
/// ```
#[derive(Clone)]
pub struct AuthToken(pub String);

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthToken").field(&"[redacted]").finish()
    }
}

impl<S> FromRequestParts<S> for AuthToken
where
    Arc<AuthContext>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = Arc::<AuthContext>::from_ref(state);

        get_auth_token_from_headers(&ctx.config, &parts.headers)
            .map(AuthToken)
            .ok_or_else(|| {
                tracing::debug!(
                    "No '{}' cookie on request",
                    ctx.config.auth_token_cookie_name
                );
                AuthRedirect::new(parts.method.clone(), &ctx.config.home_url)
            })
    }
}

impl<S> OptionalFromRequestParts<S> for AuthToken
where
    Arc<AuthContext>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthToken as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
