//! Display Name Value Object

use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};

const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Human-readable name shown for an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> IdentityResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(IdentityError::validation("Name cannot be empty"));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(IdentityError::validation(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Validate an optional name.
    ///
    /// `require` turns an absent (or blank) name into a validation failure;
    /// otherwise blank input is treated as absent.
    pub fn optional(name: Option<String>, require: bool) -> IdentityResult<Option<Self>> {
        match name.filter(|n| !n.trim().is_empty()) {
            Some(n) => Self::new(n).map(Some),
            None if require => Err(IdentityError::validation("Name is required")),
            None => Ok(None),
        }
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
