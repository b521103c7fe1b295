//! Account state machine
//!
//! Drives registration, email confirmation, sign-in and password reset on
//! top of the verification code engine:
//! - Unconfirmed -> CodeActive -> Confirmed
//! - Reset requested -> CodeActive -> PasswordChanged
//! - Failed sign-ins counted, with an automatic reset code at the threshold

mod config;
mod password;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use password::{PasswordHasher, PasswordPolicy};
pub use service::AccountService;
pub use types::{EmailConfirmationState, LoginOutcome, PasswordResetState, RegistrationOutcome};
