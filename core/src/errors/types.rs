//! Authentication error types and their outward representation
//!
//! Every reason a submitted code is rejected collapses into
//! `AuthError::InvalidOrExpiredCode`, so responses never reveal whether an
//! account exists, a code expired or the digits were wrong.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DomainError;

/// The single message shown for any rejected verification code
pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired code";

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Weak password: {reason}")]
    WeakPassword { reason: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Account has no delivery address")]
    MissingDeliveryAddress,
}

impl AuthError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::WeakPassword { .. } => "WEAK_PASSWORD",
            AuthError::InvalidEmail => "INVALID_EMAIL",
            AuthError::MissingDeliveryAddress => "MISSING_DELIVERY_ADDRESS",
        }
    }
}

/// Unified error response structure for callers facing end users
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

/// Storage and internal details stay in the logs
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Auth(auth) => ErrorResponse::new(auth.error_code(), auth.to_string()),
            DomainError::Validation { message } => ErrorResponse::new("VALIDATION_ERROR", message),
            DomainError::NotFound { .. } => {
                ErrorResponse::new("INVALID_OR_EXPIRED_CODE", INVALID_CODE_MESSAGE)
            }
            DomainError::Delivery { .. } => ErrorResponse::new(
                "DELIVERY_FAILED",
                "We could not send the email. Please request a new code",
            ),
            DomainError::Conflict { .. }
            | DomainError::Storage { .. }
            | DomainError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "Something went wrong. Please try again later")
            }
        }
    }
}
