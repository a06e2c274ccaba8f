use crate::config::AuthConfig;
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::TokenResponse;

/// Trade the authorization code and PKCE verifier for the auth token.
pub(crate) async fn exchange_code_for_token(
    client: &reqwest::Client,
    config: &AuthConfig,
    code: &str,
    verifier: &str,
) -> Result<TokenResponse, OAuth2Error> {
    let mut url = config.auth_endpoint("token");
    url.query_pairs_mut()
        .append_pair("code", code)
        .append_pair("verifier", verifier);

    tracing::debug!("Exchanging authorization code at {}", config.auth_endpoint("token"));

    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
        tracing::error!("Token exchange failed: status={}, body={}", status, body);
        return Err(OAuth2Error::TokenExchange {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    let token_response: TokenResponse =
        serde_json::from_str(&body).map_err(|e| OAuth2Error::Decode(e.to_string()))?;

    tracing::debug!("Token exchange succeeded: {:?}", token_response);
    Ok(token_response)
}
