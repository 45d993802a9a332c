//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod current_identity;
pub mod list_identities;
pub mod register;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::IdentityConfig;
pub use current_identity::CurrentIdentityUseCase;
pub use list_identities::ListIdentitiesUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase, RegistrationOutcome};
