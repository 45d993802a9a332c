//! Current Identity Use Case
//!
//! Resolves a bearer token back to the identity it was issued for.

use std::sync::Arc;

use kernel::id::IdentityId;
use platform::token::{TokenError, strip_bearer_prefix};

use crate::application::config::IdentityConfig;
use crate::domain::entity::profile::IdentityProfile;
use crate::domain::repository::IdentityRepository;
use crate::error::{IdentityError, IdentityResult};

/// Current identity use case
pub struct CurrentIdentityUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> CurrentIdentityUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    /// `authorization` is the raw header value; a `Bearer` prefix is optional
    pub async fn execute(&self, authorization: Option<&str>) -> IdentityResult<IdentityProfile> {
        let token = strip_bearer_prefix(authorization.unwrap_or_default());
        if token.is_empty() {
            return Err(IdentityError::MissingToken);
        }

        let subject = self.config.token_issuer().validate(token)?;

        let id: IdentityId = subject.parse().map_err(|_| {
            IdentityError::InvalidToken(TokenError::Malformed(
                "subject is not an identity id".to_string(),
            ))
        })?;

        // Deleted since issuance
        let identity = self.repo.find_by_id(&id).await?.ok_or_else(|| {
            IdentityError::InvalidToken(TokenError::Malformed(
                "subject does not resolve to an active identity".to_string(),
            ))
        })?;

        Ok(IdentityProfile::from(identity))
    }
}
