//! List Identities Use Case
//!
//! Paginated, redacted directory listing.

use std::sync::Arc;

use kernel::page::{Page, PageRequest};

use crate::domain::entity::profile::IdentityProfile;
use crate::domain::repository::IdentityRepository;
use crate::error::IdentityResult;

/// List identities use case
pub struct ListIdentitiesUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> ListIdentitiesUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A page past the end yields no records but accurate totals
    pub async fn execute(&self, request: PageRequest) -> IdentityResult<Page<IdentityProfile>> {
        let total = self.repo.count().await?;
        let records = if request.offset() >= total {
            Vec::new()
        } else {
            self.repo.page(request.offset(), request.limit()).await?
        };

        Ok(Page::new(records, total, request).map(IdentityProfile::from))
    }
}
