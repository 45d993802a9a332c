//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::profile::IdentityProfile;
use crate::domain::value_object::auth_provider::AuthProvider;

// ============================================================================
// Identity
// ============================================================================

/// Redacted identity as returned by every endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub auth_provider: AuthProvider,
    pub avatar_ref: Option<String>,
    /// `YYYY-MM-DD`
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IdentityProfile> for IdentityResponse {
    fn from(profile: IdentityProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
            auth_provider: profile.auth_provider,
            avatar_ref: profile.avatar_ref,
            date_of_birth: profile.date_of_birth,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    /// Absent or empty for social accounts
    pub password: Option<String>,
    /// `local` or `social`
    pub auth_provider: Option<String>,
    pub avatar_ref: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub identity: IdentityResponse,
    /// `created` or `existing`
    pub message: &'static str,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub identity: IdentityResponse,
}

// ============================================================================
// Listing
// ============================================================================

/// Raw query parameters; malformed numbers fall back to defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIdentitiesQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

// ============================================================================
// Current Identity / Logout
// ============================================================================

/// Current identity response
#[derive(Debug, Clone, Serialize)]
pub struct CurrentIdentityResponse {
    pub identity: IdentityResponse,
}

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
