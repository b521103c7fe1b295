//! Account policy configuration: login throttling, lockout and password rules

use serde::{Deserialize, Serialize};

/// Password strength rules applied at registration and reset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordPolicyConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_true")]
    pub require_digit: bool,
    #[serde(default = "default_true")]
    pub require_lowercase: bool,
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    #[serde(default = "default_true")]
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

/// Account state machine policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountPolicyConfig {
    /// Consecutive failed logins after which a password reset code is
    /// issued automatically
    #[serde(default = "default_failed_login_reset_threshold")]
    pub failed_login_reset_threshold: u32,

    /// Consecutive failed logins after which the account is locked out.
    /// `None` disables lockout.
    #[serde(default)]
    pub lockout_threshold: Option<u32>,

    /// Refuse sign-in until the email address is confirmed
    #[serde(default)]
    pub require_confirmed_email: bool,

    /// bcrypt work factor for stored passwords
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default)]
    pub password: PasswordPolicyConfig,
}

impl Default for AccountPolicyConfig {
    fn default() -> Self {
        Self {
            failed_login_reset_threshold: default_failed_login_reset_threshold(),
            lockout_threshold: None,
            require_confirmed_email: false,
            bcrypt_cost: default_bcrypt_cost(),
            password: PasswordPolicyConfig::default(),
        }
    }
}

fn default_min_length() -> usize {
    6
}

fn default_true() -> bool {
    true
}

fn default_failed_login_reset_threshold() -> u32 {
    2
}

fn default_bcrypt_cost() -> u32 {
    12
}
