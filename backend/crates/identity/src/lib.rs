//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait, credential codec
//! - `application/` - Use cases (register, authenticate, current identity, listing)
//! - `infra/` - PostgreSQL and in-memory identity stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Idempotent registration keyed by email (`local` or `social` accounts)
//! - Email + password login issuing stateless HS256 bearer tokens
//! - Paginated, redacted identity directory
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Credential hashes never leave the domain layer
//! - Login and token failures share one generic message per class

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::{InMemoryIdentityRepository, PgIdentityRepository};
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
