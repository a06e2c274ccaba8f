use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::provider::ProviderProfile;

/// An `ext::auth::Identity` as seen through a session token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Issuer URL of the provider that authenticated the identity
    pub issuer: String,
}

/// Fields written when a user is created for an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub identity_id: Uuid,
}

impl NewUser {
    pub fn from_profile(profile: ProviderProfile, identity_id: Uuid) -> Self {
        Self {
            email: profile.email,
            name: profile.name,
            avatar: profile.avatar_url,
            identity_id,
        }
    }
}

/// A user row held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub identity_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Result of linking an identity to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new user was written for the identity
    Created { user_id: Uuid },
    /// The identity already had a user; nothing was written
    AlreadyLinked { user_id: Uuid },
}

impl LinkOutcome {
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Created { user_id } | Self::AlreadyLinked { user_id } => *user_id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}
