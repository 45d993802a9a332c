//! Credential Value Objects
//!
//! Domain wrappers over `platform::password`.
//!
//! - [`RawPassword`] is user input, kept byte-for-byte and zeroized on drop.
//!   Only the empty string is refused. It never leaves the credential codec.
//! - [`CredentialHash`] is what gets stored. Social accounts store an empty
//!   hash.

use crate::error::{IdentityError, IdentityResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> IdentityResult<Self> {
        let clear_text = ClearTextPassword::new(raw)
            .map_err(|_| IdentityError::validation("Password is required"))?;

        Ok(Self(clear_text))
    }

    pub(crate) fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored credential hash (PHC string, or empty for social accounts)
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// No credential (social account)
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn from_hashed(hashed: HashedPassword) -> Self {
        Self(hashed.as_phc_string().to_string())
    }

    /// Stored values are taken as-is; an unparseable hash just never verifies
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parsed form, if this is a well-formed PHC string
    pub fn to_hashed(&self) -> Option<HashedPassword> {
        if self.is_empty() {
            return None;
        }
        HashedPassword::from_phc_string(self.0.as_str()).ok()
    }

    pub fn as_db_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_empty() { "[NONE]" } else { "[HASH]" };
        f.debug_tuple("CredentialHash").field(&shown).finish()
    }
}
