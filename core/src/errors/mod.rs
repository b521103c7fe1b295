//! Domain-specific error types and error handling.

mod types;


// Re-export all error types and utilities
pub use types::{AuthError, ErrorResponse, INVALID_CODE_MESSAGE};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A save lost against a concurrent update of the same record
    #[error("Conflicting update: {resource}")]
    Conflict { resource: String },

    /// I/O failure from the token store or user directory
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// The mail sender could not deliver a code
    #[error("Delivery error: {message}")]
    Delivery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage { message: message.into() }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        DomainError::Delivery { message: message.into() }
    }

    pub fn conflict(resource: impl Into<String>) -> Self {
        DomainError::Conflict { resource: resource.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation { message: message.into() }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
