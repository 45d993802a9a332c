//! Platform Crate - Technical Infrastructure
//!
//! Cryptographic building blocks shared by the domain crates:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bounded bearer tokens (HS256 JWT)

pub mod password;
pub mod token;
