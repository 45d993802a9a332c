//! Identity Profile
//!
//! Redacted view of an [`Identity`]. There is no credential field here, so
//! nothing built from a profile can leak a hash.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::IdentityId;

use super::identity::Identity;
use crate::domain::value_object::auth_provider::AuthProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub id: IdentityId,
    pub name: Option<String>,
    pub email: String,
    pub auth_provider: AuthProvider,
    pub avatar_ref: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityProfile {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name.as_ref().map(|n| n.as_str().to_string()),
            email: identity.email.as_str().to_string(),
            auth_provider: identity.auth_provider,
            avatar_ref: identity.avatar_ref.clone(),
            date_of_birth: identity.date_of_birth.map(|d| d.date()),
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

impl From<Identity> for IdentityProfile {
    fn from(identity: Identity) -> Self {
        Self::from(&identity)
    }
}
