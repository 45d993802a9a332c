//! In-Memory Repository Implementation
//!
//! Process-local store for tests and local development. Enforces the same
//! active-email uniqueness as the Postgres partial index.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::IdentityId;
use tokio::sync::RwLock;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

#[derive(Clone, Default)]
pub struct InMemoryIdentityRepository {
    identities: Arc<RwLock<Vec<Identity>>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soft-delete an active identity. Returns whether a record was tombstoned.
    pub async fn soft_delete(&self, id: &IdentityId) -> IdentityResult<bool> {
        let mut identities = self.identities.write().await;
        let Some(identity) = identities
            .iter_mut()
            .find(|i| i.id == *id && i.is_active())
        else {
            return Ok(false);
        };

        identity.mark_deleted(Utc::now());
        Ok(true)
    }

    /// Every stored record, tombstones included
    pub async fn len_including_deleted(&self) -> usize {
        self.identities.read().await.len()
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, new: &NewIdentity) -> IdentityResult<Identity> {
        let mut identities = self.identities.write().await;

        if identities
            .iter()
            .any(|i| i.is_active() && i.email == new.email)
        {
            return Err(IdentityError::Conflict);
        }

        let identity = Identity::from_new(new.clone(), IdentityId::new(), Utc::now());
        identities.push(identity.clone());

        Ok(identity)
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Identity>> {
        let identities = self.identities.read().await;
        Ok(identities
            .iter()
            .find(|i| i.is_active() && i.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> IdentityResult<Option<Identity>> {
        let identities = self.identities.read().await;
        Ok(identities
            .iter()
            .find(|i| i.is_active() && i.id == *id)
            .cloned())
    }

    async fn count(&self) -> IdentityResult<u64> {
        let identities = self.identities.read().await;
        Ok(identities.iter().filter(|i| i.is_active()).count() as u64)
    }

    async fn page(&self, offset: u64, limit: u64) -> IdentityResult<Vec<Identity>> {
        let identities = self.identities.read().await;
        let mut active: Vec<&Identity> = identities.iter().filter(|i| i.is_active()).collect();
        active.sort_by_key(|i| (i.created_at, *i.id.as_uuid()));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(active
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
