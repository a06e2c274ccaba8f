use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

use crate::userdb::errors::UserError;
use crate::userdb::types::{LinkOutcome, NewUser, User};

/// Talks to the EdgeQL-over-HTTP endpoint of the database branch.
pub struct EdgeqlHttpStore {
    pub(super) client: reqwest::Client,
    pub(super) endpoint: Url,
    pub(super) secret_key: Option<String>,
}

/// Keeps identities and users in process memory.
///
/// Identities are only visible to the client token they were registered
/// with, the same way the auth extension scopes them.
pub struct MemoryUserStore {
    pub(super) state: Mutex<MemoryState>,
}

#[derive(Default)]
pub(super) struct MemoryState {
    pub(super) identities: HashMap<Uuid, MemoryIdentity>,
    /// Users keyed by the identity they are linked to
    pub(super) users: HashMap<Uuid, User>,
}

pub(super) struct MemoryIdentity {
    pub(super) issuer: String,
    pub(super) client_token: String,
}

/// Identity and user access, authorized by the session's auth token.
///
/// Every call passes the auth token so the database can evaluate its access
/// policies as the signed-in identity.
#[async_trait]
pub trait UpstreamStore: Send + Sync + 'static {
    /// Issuer URL of the identity, or `None` when the token cannot see it.
    async fn identity_issuer(
        &self,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<String>, UserError>;

    /// Id of the user already linked to the identity, if any.
    async fn user_for_identity(
        &self,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<Uuid>, UserError>;

    /// Create the user for `user.identity_id`. A second insert for the same
    /// identity reports [`LinkOutcome::AlreadyLinked`] instead of failing.
    async fn insert_user(&self, auth_token: &str, user: &NewUser)
    -> Result<LinkOutcome, UserError>;
}
