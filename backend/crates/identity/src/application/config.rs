//! Application Configuration
//!
//! Configuration for the Identity application layer. Built once at startup
//! and shared behind an `Arc`.

use std::fmt;
use std::time::Duration;

use platform::token::{DEFAULT_TOKEN_TTL, TokenIssuer};

use crate::domain::services::CredentialCodec;

/// Identity application configuration
#[derive(Clone)]
pub struct IdentityConfig {
    /// HS256 signing secret. `None` makes token issuance fail as a
    /// configuration error.
    pub token_secret: Option<Vec<u8>>,
    /// Token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Reject registrations without a name
    pub require_name: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
            require_name: false,
        }
    }
}

impl IdentityConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: Some(secret.to_vec()),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(self.token_secret.as_deref(), self.token_ttl)
    }

    pub fn credential_codec(&self) -> CredentialCodec {
        CredentialCodec::new(self.password_pepper.clone())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("token_secret", &self.token_secret.as_ref().map(|_| "[REDACTED]"))
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("require_name", &self.require_name)
            .finish()
    }
}
