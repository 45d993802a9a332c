//! Auth Provider Value Object
//!
//! Where an identity's credential lives. `Local` accounts carry a password
//! hash; `Social` accounts were created on behalf of an external provider
//! and have no password at all.

use crate::error::{IdentityError, IdentityResult};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[display("local")]
    Local,
    #[display("social")]
    Social,
}

impl AuthProvider {
    /// Infer from whether a password accompanied the registration
    pub fn infer(has_password: bool) -> Self {
        if has_password {
            AuthProvider::Local
        } else {
            AuthProvider::Social
        }
    }

    /// Parse a client-supplied or stored code
    pub fn from_code(code: &str) -> IdentityResult<Self> {
        match code.trim() {
            "local" => Ok(AuthProvider::Local),
            "social" => Ok(AuthProvider::Social),
            other => Err(IdentityError::validation(format!(
                "Unknown auth provider '{}': expected 'local' or 'social'",
                other
            ))),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Social => "social",
        }
    }
}
