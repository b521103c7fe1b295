//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `account` - Login throttling, lockout and password policy
//! - `cache` - Token store backend
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Sender identity for verification mails
//! - `verification` - Code lifetimes and token provider name

pub mod account;
pub mod cache;
pub mod environment;
pub mod mail;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use account::{AccountPolicyConfig, PasswordPolicyConfig};
pub use cache::{CacheConfig, CacheType};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use verification::{VerificationConfig, DEFAULT_TOKEN_PROVIDER, MAX_CODE_LIFETIME_MINUTES};

/// Prefix of environment variables overriding configuration values,
/// e.g. `EV__VERIFICATION__PASSWORD_RESET_LIFETIME_MINUTES=30`
pub const ENV_PREFIX: &str = "EV";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Token store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Account policy configuration
    #[serde(default)]
    pub account: AccountPolicyConfig,

    /// Mail configuration
    #[serde(default)]
    pub mail: MailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Preset configuration for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            cache: CacheConfig::default(),
            verification: VerificationConfig::default(),
            account: AccountPolicyConfig::default(),
            mail: MailConfig::default(),
        };
        if environment.is_production() {
            config.cache = CacheConfig::redis("redis://cache:6379").with_prefix("envision");
        }
        config
    }

    /// Load configuration from `.env` files and `EV__*` environment variables
    /// on top of the preset for the detected environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        let overrides = ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::layered(&Self::for_environment(environment), overrides)
    }

    /// Overlay `overrides` on `defaults`
    pub fn layered<S>(defaults: &Self, overrides: S) -> Result<Self, ::config::ConfigError>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        ::config::Config::builder()
            .add_source(::config::Config::try_from(defaults)?)
            .add_source(overrides)
            .build()?
            .try_deserialize()
    }
}
