//! Domain layer containing business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    Account, StoredToken, VerificationCode, VerificationPurpose, CODE_LENGTH,
    DEFAULT_EMAIL_CONFIRMATION_MINUTES, DEFAULT_PASSWORD_RESET_MINUTES,
};
