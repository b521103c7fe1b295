//! Shared utilities and common types for the Envision account services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Logging bootstrap
//! - Utility functions (email validation, masking)

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AccountPolicyConfig, AppConfig, CacheConfig, CacheType, Environment, LogFormat,
    LoggingConfig, MailConfig, PasswordPolicyConfig, VerificationConfig,
};
pub use utils::validation;
