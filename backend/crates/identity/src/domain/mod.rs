//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the credential
//! codec.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{
    identity::{Identity, NewIdentity},
    profile::IdentityProfile,
};
pub use repository::IdentityRepository;
pub use services::CredentialCodec;
