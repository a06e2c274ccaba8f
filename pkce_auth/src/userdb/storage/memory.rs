use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::userdb::errors::UserError;
use crate::userdb::types::{LinkOutcome, NewUser, User};

use super::types::{MemoryIdentity, MemoryState, MemoryUserStore, UpstreamStore};

impl MemoryUserStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory user store");
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Make an identity visible to `client_token`.
    pub async fn register_identity(&self, identity_id: Uuid, issuer: &str, client_token: &str) {
        let mut state = self.state.lock().await;
        state.identities.insert(
            identity_id,
            MemoryIdentity {
                issuer: issuer.to_string(),
                client_token: client_token.to_string(),
            },
        );
    }

    /// Snapshot of all users, oldest first.
    pub async fn users(&self) -> Vec<User> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        users
    }

    fn visible<'a>(
        state: &'a MemoryState,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Option<&'a MemoryIdentity> {
        state
            .identities
            .get(&identity_id)
            .filter(|identity| identity.client_token == auth_token)
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamStore for MemoryUserStore {
    async fn identity_issuer(
        &self,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<String>, UserError> {
        let state = self.state.lock().await;
        Ok(Self::visible(&state, auth_token, identity_id).map(|i| i.issuer.clone()))
    }

    async fn user_for_identity(
        &self,
        auth_token: &str,
        identity_id: Uuid,
    ) -> Result<Option<Uuid>, UserError> {
        let state = self.state.lock().await;
        if Self::visible(&state, auth_token, identity_id).is_none() {
            return Ok(None);
        }
        Ok(state.users.get(&identity_id).map(|u| u.id))
    }

    async fn insert_user(
        &self,
        auth_token: &str,
        user: &NewUser,
    ) -> Result<LinkOutcome, UserError> {
        let mut state = self.state.lock().await;
        if Self::visible(&state, auth_token, user.identity_id).is_none() {
            return Err(UserError::IdentityNotFound(user.identity_id));
        }

        if let Some(existing) = state.users.get(&user.identity_id) {
            return Ok(LinkOutcome::AlreadyLinked {
                user_id: existing.id,
            });
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            identity_id: user.identity_id,
            created_at: Utc::now(),
        };
        let user_id = created.id;
        state.users.insert(user.identity_id, created);

        Ok(LinkOutcome::Created { user_id })
    }
}
