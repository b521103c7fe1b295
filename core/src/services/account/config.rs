//! Configuration for the account service

use ev_shared::config::{AccountPolicyConfig, MailConfig};

use super::password::PasswordPolicy;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Consecutive failed sign-ins that trigger an automatic reset code
    pub failed_login_reset_threshold: u32,
    /// Consecutive failed sign-ins that lock the account; `None` disables lockout
    pub lockout_threshold: Option<u32>,
    /// Refuse sign-in while the email address is unconfirmed
    pub require_confirmed_email: bool,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Password strength rules
    pub password_policy: PasswordPolicy,
    /// Product name used in mail templates
    pub app_name: String,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self::from_settings(&AccountPolicyConfig::default(), &MailConfig::default())
    }
}

impl AccountServiceConfig {
    pub fn from_settings(account: &AccountPolicyConfig, mail: &MailConfig) -> Self {
        Self {
            failed_login_reset_threshold: account.failed_login_reset_threshold,
            lockout_threshold: account.lockout_threshold,
            require_confirmed_email: account.require_confirmed_email,
            bcrypt_cost: account.bcrypt_cost,
            password_policy: PasswordPolicy::from(&account.password),
            app_name: mail.app_name.clone(),
        }
    }
}

impl From<&AccountPolicyConfig> for AccountServiceConfig {
    fn from(account: &AccountPolicyConfig) -> Self {
        Self::from_settings(account, &MailConfig::default())
    }
}
