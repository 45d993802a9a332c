//! Register Use Case
//!
//! Creates an identity, or returns the existing one for an already
//! registered email. Registration is idempotent per email.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::application::config::IdentityConfig;
use crate::domain::entity::{identity::NewIdentity, profile::IdentityProfile};
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider,
    birth_date::BirthDate,
    credential::{CredentialHash, RawPassword},
    display_name::DisplayName,
    email::Email,
};
use crate::error::{IdentityError, IdentityResult};

/// Register input
#[derive(Default)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: String,
    /// Empty string is treated as absent
    pub password: Option<String>,
    /// `local` or `social`; inferred from `password` when absent
    pub auth_provider: Option<String>,
    pub avatar_ref: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Whether the call created a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    Existing,
}

impl RegistrationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationOutcome::Created => "created",
            RegistrationOutcome::Existing => "existing",
        }
    }
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub identity: IdentityProfile,
    pub outcome: RegistrationOutcome,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<RegisterOutput> {
        let email = Email::new(input.email)?;
        let name = DisplayName::optional(input.name, self.config.require_name)?;
        let date_of_birth = input
            .date_of_birth
            .map(|date| BirthDate::new(date, Utc::now().date_naive()))
            .transpose()?;

        // A repeat registration returns the existing record whatever provider
        // or password it carries.
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            tracing::info!(identity_id = %existing.id, "Registration for existing identity");
            return Ok(RegisterOutput {
                identity: IdentityProfile::from(existing),
                outcome: RegistrationOutcome::Existing,
            });
        }

        let password = input.password.filter(|p| !p.is_empty());
        let explicit = input
            .auth_provider
            .as_deref()
            .map(AuthProvider::from_code)
            .transpose()?;
        let provider = explicit.unwrap_or_else(|| AuthProvider::infer(password.is_some()));

        // A password sent with an explicit social provider is discarded unread.
        let credential = match (provider, password) {
            (AuthProvider::Local, Some(p)) => {
                self.config.credential_codec().hash(&RawPassword::new(p)?)?
            }
            (AuthProvider::Local, None) => {
                return Err(IdentityError::validation(
                    "Password is required for local accounts",
                ));
            }
            (AuthProvider::Social, _) => CredentialHash::empty(),
        };

        let new = NewIdentity::new(name, email, credential, provider, input.avatar_ref)?
            .with_date_of_birth(date_of_birth);
        let identity = self.repo.create(&new).await?;

        tracing::info!(
            identity_id = %identity.id,
            auth_provider = %identity.auth_provider,
            "Identity registered"
        );

        Ok(RegisterOutput {
            identity: IdentityProfile::from(identity),
            outcome: RegistrationOutcome::Created,
        })
    }
}
