//! Configuration for the verification service

use chrono::Duration;
use ev_shared::config::{VerificationConfig, DEFAULT_TOKEN_PROVIDER, MAX_CODE_LIFETIME_MINUTES};

use crate::domain::entities::verification_code::{
    VerificationPurpose, DEFAULT_EMAIL_CONFIRMATION_MINUTES, DEFAULT_PASSWORD_RESET_MINUTES,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Fixed provider name scoping every token this service writes
    pub token_provider: String,
    /// Default lifetime of an email confirmation code
    pub email_confirmation_lifetime: Duration,
    /// Default lifetime of a password reset code
    pub password_reset_lifetime: Duration,
}

impl VerificationServiceConfig {
    /// Default lifetime for a purpose
    pub fn lifetime_for(&self, purpose: VerificationPurpose) -> Duration {
        match purpose {
            VerificationPurpose::EmailConfirmation => self.email_confirmation_lifetime,
            VerificationPurpose::PasswordReset => self.password_reset_lifetime,
        }
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_provider: DEFAULT_TOKEN_PROVIDER.to_string(),
            email_confirmation_lifetime: Duration::minutes(DEFAULT_EMAIL_CONFIRMATION_MINUTES),
            password_reset_lifetime: Duration::minutes(DEFAULT_PASSWORD_RESET_MINUTES),
        }
    }
}

/// Lifetimes beyond `MAX_CODE_LIFETIME_MINUTES` are clamped; a non-positive
/// lifetime passes through and is rejected when a code is issued
impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            token_provider: config.token_provider.clone(),
            email_confirmation_lifetime: bounded_minutes(config.email_confirmation_lifetime_minutes),
            password_reset_lifetime: bounded_minutes(config.password_reset_lifetime_minutes),
        }
    }
}

fn bounded_minutes(minutes: i64) -> Duration {
    Duration::minutes(minutes.clamp(-MAX_CODE_LIFETIME_MINUTES, MAX_CODE_LIFETIME_MINUTES))
}
