//! Email Value Object
//!
//! Natural key for registration dedup and login lookup. The value is stored
//! exactly as submitted, so `A@x.com` and `a@x.com` are distinct identities.
//! Input with surrounding whitespace is refused rather than rewritten.

use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> IdentityResult<Self> {
        let email = email.into();

        if email.trim().is_empty() {
            return Err(IdentityError::validation("Email is required"));
        }

        if email.trim() != email {
            return Err(IdentityError::validation(
                "Email must not have leading or trailing whitespace",
            ));
        }

        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(IdentityError::validation(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = IdentityError;

    fn from_str(s: &str) -> IdentityResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
