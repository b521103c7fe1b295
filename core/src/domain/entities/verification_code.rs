//! Verification purposes and the plaintext one-time code.

use std::fmt;

use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Exclusive upper bound of the numeric code range
const CODE_SPACE: u32 = 1_000_000;

/// Default lifetime of an email confirmation code (one day)
pub const DEFAULT_EMAIL_CONFIRMATION_MINUTES: i64 = 24 * 60;

/// Default lifetime of a password reset code
pub const DEFAULT_PASSWORD_RESET_MINUTES: i64 = 15;

/// Which lifecycle a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationPurpose {
    EmailConfirmation,
    PasswordReset,
}

impl VerificationPurpose {
    /// Stable name used as the purpose part of the token store key
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::EmailConfirmation => "EmailConfirmation",
            VerificationPurpose::PasswordReset => "PasswordReset",
        }
    }
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plaintext 6-digit code.
///
/// Lives only in memory and in the outbound mail. `Debug` is redacted so the
/// value cannot end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Draw a new code uniformly from [0, 999999] using the OS CSPRNG
    pub fn generate() -> Self {
        let value = OsRng.gen_range(0..CODE_SPACE);
        Self(format!("{:0width$}", value, width = CODE_LENGTH))
    }

    /// The digits to deliver to the user
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

#[cfg(test)]
impl From<&str> for VerificationCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
