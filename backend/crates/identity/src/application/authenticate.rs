//! Authenticate Use Case
//!
//! Verifies email + password and issues a bearer token whose subject is the
//! identity id.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::IdentityConfig;
use crate::domain::entity::profile::IdentityProfile;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{credential::RawPassword, email::Email};
use crate::error::{IdentityError, IdentityResult};

pub const TOKEN_TYPE: &str = "Bearer";

/// Authenticate input
#[derive(Default)]
pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug)]
pub struct AuthenticateOutput {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub identity: IdentityProfile,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> AuthenticateUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> IdentityResult<AuthenticateOutput> {
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;

        let identity = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        if !identity.has_credential() {
            return Err(IdentityError::SocialAccount);
        }

        if !self
            .config
            .credential_codec()
            .verify(&password, &identity.credential)
        {
            return Err(IdentityError::InvalidCredentials);
        }

        let issued = self.config.token_issuer().issue(&identity.id.to_string())?;

        tracing::info!(identity_id = %identity.id, "Identity authenticated");

        Ok(AuthenticateOutput {
            token: issued.token,
            token_type: TOKEN_TYPE,
            expires_at: issued.expires_at,
            identity: IdentityProfile::from(identity),
        })
    }
}
