//! Types for account service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    /// Identifier of the new, unconfirmed account
    pub account_id: Uuid,
    /// When the mailed confirmation code stops working
    pub confirmation_expires_at: DateTime<Utc>,
}

/// Result of a sign-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginOutcome {
    Succeeded { account_id: Uuid },
    /// Unknown email or wrong password; the two are not distinguished
    Failed,
    LockedOut,
    /// Correct password but the email address is not confirmed yet
    NotAllowed,
}

/// Where an account is in the email confirmation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailConfirmationState {
    Unconfirmed,
    CodeActive,
    /// Terminal
    Confirmed,
}

/// Whether a password reset is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordResetState {
    NoActiveCode,
    CodeActive,
}
