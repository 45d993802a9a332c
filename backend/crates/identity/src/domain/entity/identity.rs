//! Identity Entity
//!
//! The single persisted record of the service. Holds the credential hash,
//! so it is never serialized directly; outward views go through
//! [`IdentityProfile`](super::profile::IdentityProfile).

use chrono::{DateTime, Utc};
use kernel::id::IdentityId;

use crate::domain::value_object::{
    auth_provider::AuthProvider, birth_date::BirthDate, credential::CredentialHash, display_name::DisplayName,
    email::Email, lifecycle::Lifecycle,
};
use crate::error::{IdentityError, IdentityResult};

/// Identity entity
#[derive(Debug, Clone)]
pub struct Identity {
    /// Store-assigned UUID
    pub id: IdentityId,
    pub name: Option<DisplayName>,
    /// Unique among active records
    pub email: Email,
    /// Empty for social accounts
    pub credential: CredentialHash,
    pub auth_provider: AuthProvider,
    /// Reference to a stored avatar image
    pub avatar_ref: Option<String>,
    pub date_of_birth: Option<BirthDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl Identity {
    /// Materialize a pending record with its store-assigned id
    pub fn from_new(new: NewIdentity, id: IdentityId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            credential: new.credential,
            auth_provider: new.auth_provider,
            avatar_ref: new.avatar_ref,
            date_of_birth: new.date_of_birth,
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Whether a password login is possible at all
    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Tombstone the record
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.lifecycle = Lifecycle::Deleted { at };
        self.updated_at = at;
    }
}

/// A record about to be created (no id yet)
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: Option<DisplayName>,
    pub email: Email,
    pub credential: CredentialHash,
    pub auth_provider: AuthProvider,
    pub avatar_ref: Option<String>,
    pub date_of_birth: Option<BirthDate>,
}

impl NewIdentity {
    /// Local accounts must carry a hash and social accounts must not.
    pub fn new(
        name: Option<DisplayName>,
        email: Email,
        credential: CredentialHash,
        auth_provider: AuthProvider,
        avatar_ref: Option<String>,
    ) -> IdentityResult<Self> {
        match (auth_provider, credential.is_empty()) {
            (AuthProvider::Local, true) => Err(IdentityError::Internal(
                "local identity without credential hash".to_string(),
            )),
            (AuthProvider::Social, false) => Err(IdentityError::Internal(
                "social identity with credential hash".to_string(),
            )),
            _ => Ok(Self {
                name,
                email,
                credential,
                auth_provider,
                avatar_ref: avatar_ref.filter(|a| !a.trim().is_empty()),
                date_of_birth: None,
            }),
        }
    }

    pub fn with_date_of_birth(mut self, date_of_birth: Option<BirthDate>) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }
}
