use uuid::Uuid;

use crate::provider::Issuer;

use super::errors::UserError;
use super::storage::UpstreamStore;
use super::types::{LinkOutcome, NewUser};

/// Look up which provider authenticated the identity.
#[tracing::instrument(skip(store, auth_token))]
pub(crate) async fn resolve_issuer(
    store: &dyn UpstreamStore,
    auth_token: &str,
    identity_id: Uuid,
) -> Result<Issuer, UserError> {
    let issuer = store
        .identity_issuer(auth_token, identity_id)
        .await?
        .ok_or(UserError::IdentityNotFound(identity_id))?;

    tracing::debug!(issuer = %issuer, "Resolved identity issuer");
    Ok(Issuer::from_url(&issuer))
}

#[tracing::instrument(skip(store, auth_token))]
pub(crate) async fn find_linked_user(
    store: &dyn UpstreamStore,
    auth_token: &str,
    identity_id: Uuid,
) -> Result<Option<Uuid>, UserError> {
    let user_id = store.user_for_identity(auth_token, identity_id).await?;
    tracing::debug!(found = user_id.is_some(), "Linked user lookup completed");
    Ok(user_id)
}

#[tracing::instrument(skip(store, auth_token, user), fields(identity_id = %user.identity_id))]
pub(crate) async fn create_user(
    store: &dyn UpstreamStore,
    auth_token: &str,
    user: &NewUser,
) -> Result<LinkOutcome, UserError> {
    let outcome = store.insert_user(auth_token, user).await?;
    match outcome {
        LinkOutcome::Created { user_id } => {
            tracing::info!(user_id = %user_id, "Created user for identity");
        }
        LinkOutcome::AlreadyLinked { user_id } => {
            tracing::info!(user_id = %user_id, "Identity was already linked, no user created");
        }
    }
    Ok(outcome)
}
