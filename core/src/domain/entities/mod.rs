//! Domain entities representing core business objects.

pub mod account;
pub mod stored_token;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use account::Account;
pub use stored_token::StoredToken;
pub use verification_code::{
    VerificationCode, VerificationPurpose, CODE_LENGTH, DEFAULT_EMAIL_CONFIRMATION_MINUTES,
    DEFAULT_PASSWORD_RESET_MINUTES,
};
