//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Client-facing messages are deliberately
//! coarse: credential and token failures never reveal whether an account
//! exists, and server-side failures never echo their cause.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

pub type IdentityResult<T> = Result<T, IdentityError>;

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account was created through a social provider and has no password
    #[error("Account has no local credential (social login account)")]
    SocialAccount,

    /// No bearer token on a request that needs one
    #[error("No token provided")]
    MissingToken,

    /// Token failed validation, or its subject no longer resolves
    #[error("Invalid token: {0}")]
    InvalidToken(TokenError),

    /// Unique email constraint hit while persisting (concurrent registration)
    #[error("Email already registered")]
    Conflict,

    /// Server misconfiguration (e.g. no token signing secret)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing failed
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failure reported by a non-SQL store
    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    pub fn validation(message: impl Into<String>) -> Self {
        IdentityError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::BadRequest,
            IdentityError::InvalidCredentials
            | IdentityError::SocialAccount
            | IdentityError::MissingToken
            | IdentityError::InvalidToken(_) => ErrorKind::Unauthorized,
            IdentityError::Conflict => ErrorKind::Conflict,
            IdentityError::Config(_)
            | IdentityError::Credential(_)
            | IdentityError::Database(_)
            | IdentityError::Store(_)
            | IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the client-facing `AppError`
    pub fn into_app_error(self) -> AppError {
        match self {
            IdentityError::Validation(message) => AppError::bad_request(message),
            IdentityError::InvalidCredentials | IdentityError::SocialAccount => {
                AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE)
            }
            IdentityError::MissingToken => AppError::unauthorized("No token provided")
                .with_action("Send an Authorization: Bearer <token> header"),
            IdentityError::InvalidToken(_) => AppError::unauthorized("Invalid token")
                .with_action("Please log in again"),
            IdentityError::Conflict => AppError::conflict("Email already registered")
                .with_action("Retry the registration to receive the existing account"),
            IdentityError::Database(e) => {
                AppError::internal("Internal server error").with_source(e)
            }
            IdentityError::Config(_)
            | IdentityError::Credential(_)
            | IdentityError::Store(_)
            | IdentityError::Internal(_) => AppError::internal("Internal server error"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Store(msg) => {
                tracing::error!(message = %msg, "Identity store error");
            }
            IdentityError::Config(msg) => {
                tracing::error!(message = %msg, "Identity configuration error");
            }
            IdentityError::Credential(msg) => {
                tracing::error!(message = %msg, "Credential hashing error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::SocialAccount => {
                tracing::warn!("Password login attempted on social login account");
            }
            IdentityError::InvalidToken(e) => {
                tracing::warn!(reason = e.reason(), error = %e, "Rejected bearer token");
            }
            IdentityError::Conflict => {
                tracing::warn!("Concurrent registration hit unique email constraint");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<TokenError> for IdentityError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingSecret => IdentityError::Config(err.to_string()),
            TokenError::Encoding(msg) => IdentityError::Internal(msg),
            other => IdentityError::InvalidToken(other),
        }
    }
}

impl From<PasswordHashError> for IdentityError {
    fn from(err: PasswordHashError) -> Self {
        IdentityError::Credential(err.to_string())
    }
}
