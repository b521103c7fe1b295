//! Verification code configuration

use serde::{Deserialize, Serialize};

/// Provider name scoping every token written by the verification service
pub const DEFAULT_TOKEN_PROVIDER: &str = "EmailCode";

/// Longest accepted code lifetime, one leap year
pub const MAX_CODE_LIFETIME_MINUTES: i64 = 366 * 24 * 60;

/// Lifetimes and scoping of verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Provider name used in the token store key
    #[serde(default = "default_token_provider")]
    pub token_provider: String,

    /// Minutes an email confirmation code stays valid
    #[serde(default = "default_email_confirmation_lifetime")]
    pub email_confirmation_lifetime_minutes: i64,

    /// Minutes a password reset code stays valid
    #[serde(default = "default_password_reset_lifetime")]
    pub password_reset_lifetime_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            token_provider: default_token_provider(),
            email_confirmation_lifetime_minutes: default_email_confirmation_lifetime(),
            password_reset_lifetime_minutes: default_password_reset_lifetime(),
        }
    }
}

fn default_token_provider() -> String {
    DEFAULT_TOKEN_PROVIDER.to_string()
}

fn default_email_confirmation_lifetime() -> i64 {
    24 * 60 // one day
}

fn default_password_reset_lifetime() -> i64 {
    15
}
