//! Repository Traits
//!
//! Interface to the identity store. Implementations are in the
//! infrastructure layer. Every query only sees active (non-deleted) records.

use kernel::id::IdentityId;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::value_object::email::Email;
use crate::error::IdentityResult;

/// Identity repository trait
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Persist a new record and return it with its assigned id.
    ///
    /// An active record with the same email yields `IdentityError::Conflict`.
    async fn create(&self, new: &NewIdentity) -> IdentityResult<Identity>;

    /// Find an active record by exact email
    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Identity>>;

    /// Find an active record by id
    async fn find_by_id(&self, id: &IdentityId) -> IdentityResult<Option<Identity>>;

    /// Number of active records
    async fn count(&self) -> IdentityResult<u64>;

    /// Active records ordered by `(created_at, id)`
    async fn page(&self, offset: u64, limit: u64) -> IdentityResult<Vec<Identity>>;
}
