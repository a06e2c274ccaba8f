use http::StatusCode;
use pkce_auth::{CoordinationError, OAuth2Error, ProviderError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Status code for a failed flow.
///
/// Client-side mistakes are 400, an issuer this service does not handle is
/// 403, upstream failures are 502 and timeouts are 504.
pub fn status_for(err: &CoordinationError) -> StatusCode {
    if err.is_retryable() {
        return StatusCode::GATEWAY_TIMEOUT;
    }
    match err {
        CoordinationError::OAuth2Error(
            OAuth2Error::Provider(_) | OAuth2Error::MissingCode | OAuth2Error::VerifierNotFound,
        ) => StatusCode::BAD_REQUEST,
        CoordinationError::OAuth2Error(OAuth2Error::Utils(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        CoordinationError::OAuth2Error(_) => StatusCode::BAD_GATEWAY,
        CoordinationError::ProviderError(ProviderError::UnsupportedIssuer(_)) => {
            StatusCode::FORBIDDEN
        }
        CoordinationError::ProviderError(_) => StatusCode::BAD_GATEWAY,
        CoordinationError::UserError(_) => StatusCode::BAD_GATEWAY,
        CoordinationError::UtilsError(_) | CoordinationError::ConfigError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps `CoordinationError` variants to a status code and a body safe for the browser
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (status_for(&e), e.public_message()))
    }
}
