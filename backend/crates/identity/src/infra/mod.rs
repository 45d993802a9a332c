//! Infrastructure Layer
//!
//! Identity store implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryIdentityRepository;
pub use postgres::PgIdentityRepository;
