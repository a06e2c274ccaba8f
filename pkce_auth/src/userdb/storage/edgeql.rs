use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

use crate::userdb::errors::UserError;
use crate::userdb::types::{Identity, LinkOutcome, NewUser};

use super::types::{EdgeqlHttpStore, UpstreamStore};

const CLIENT_TOKEN_GLOBAL: &str = "ext::auth::client_token";

const SELECT_IDENTITY: &str = r#"
select ext::auth::Identity { id, issuer }
filter .id = <uuid>$identity_id
"#;

const SELECT_USER_FOR_IDENTITY: &str = r#"
select User { id }
filter .identity.id = <uuid>$identity_id
"#;

// Requires an exclusive constraint on User.identity.
const INSERT_USER: &str = r#"
select (
  insert User {
    email := <str>$email,
    name := <str>$name,
    avatar := <optional str>$avatar,
    identity := (
      select ext::auth::Identity filter .id = <uuid>$identity_id
    ),
  }
  unless conflict on .identity
) { id }
"#;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct EdgeqlResponse<T> {
    data: Option<Vec<T>>,
    error: Option<EdgeqlError>,
}

#[derive(Debug, Deserialize)]
struct EdgeqlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: Uuid,
}

impl EdgeqlHttpStore {
    /// `endpoint` is the branch's EdgeQL URL, e.g.
    /// `http://localhost:10701/branch/main/edgeql`.
    pub fn new(client: reqwest::Client, endpoint: Url, secret_key: Option<String>) -> Self {
        tracing::info!("Creating EdgeQL HTTP user store for {}", endpoint);
        Self {
            client,
            endpoint,
            secret_key,
        }
    }

    #[tracing::instrument(skip(self, auth_token, variables), fields(endpoint = %self.endpoint))]
    async fn query<T: DeserializeOwned>(
        &self,
        auth_token: &str,
        query: &str,
        variables: Value,
    ) -> Result<Vec<T>, UserError> {
        let body = json!({
            "query": query,
            "variables": variables,
            "globals": { CLIENT_TOKEN_GLOBAL: auth_token },
        });

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(secret_key) = &self.secret_key {
            request = request.bearer_auth(secret_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed: EdgeqlResponse<T> = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                tracing::error!("EdgeQL request failed: status={}, body={}", status, text);
                return Err(UserError::Upstream(format!("status {status}")));
            }
        };

        if let Some(error) = parsed.error {
            tracing::error!(
                "EdgeQL query failed: type={}, message={}",
                error.kind.as_deref().unwrap_or("unknown"),
                error.message
            );
            return Err(UserError::Upstream(error.message));
        }

        parsed
            .data
            .ok_or_else(|| UserError::Decode("EdgeQL response has neither data nor error".into()))
    }
}

#[async_trait]
impl UpstreamStore for EdgeqlHttpStore {
    async fn identity_issuer(
        &self,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<String>, UserError> {
        let rows: Vec<Identity> = self
            .query(
                auth_token,
                SELECT_IDENTITY,
                json!({ "identity_id": identity_id }),
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| row.issuer))
    }

    async fn user_for_identity(
        &self,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<Uuid>, UserError> {
        let rows: Vec<IdRow> = self
            .query(
                auth_token,
                SELECT_USER_FOR_IDENTITY,
                json!({ "identity_id": identity_id }),
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| row.id))
    }

    async fn insert_user(
        &self,
        auth_token: &str,
        user: &NewUser,
    ) -> Result<LinkOutcome, UserError> {
        let rows: Vec<IdRow> = self
            .query(auth_token, INSERT_USER, insert_variables(user))
            .await?;

        if let Some(row) = rows.into_iter().next() {
            return Ok(LinkOutcome::Created { user_id: row.id });
        }

        // Empty result means the conflict clause fired.
        match self.user_for_identity(auth_token, user.identity_id).await? {
            Some(user_id) => Ok(LinkOutcome::AlreadyLinked { user_id }),
            None => Err(UserError::IdentityNotFound(user.identity_id)),
        }
    }
}

fn insert_variables(user: &NewUser) -> Value {
    json!({
        "email": user.email,
        "name": user.name,
        "avatar": user.avatar,
        "identity_id": user.identity_id,
    })
}
