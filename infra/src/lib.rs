//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the account services depend
//! on, plus the wiring that assembles them from an [`AppConfig`].
//!
//! ## Architecture
//!
//! - **Cache**: Redis client and the Redis-backed token store
//! - **Memory**: Process-local token store and user directory
//! - **Mail**: Log-only mail sender for development and tests
//! - **Token store backend**: Runtime selection between the two token stores

use std::sync::Arc;

use ev_core::{AccountService, AccountServiceConfig, VerificationService, VerificationServiceConfig};
use ev_shared::config::{AppConfig, VerificationConfig, MAX_CODE_LIFETIME_MINUTES};
use tracing::info;

// Re-export core types for convenience
pub use ev_core::errors::*;

/// Cache module - Redis client and token store
pub mod cache;

/// Mail delivery module
pub mod mail;

/// In-memory implementations
pub mod memory;

/// Token store selected from configuration
pub mod token_store;

pub use mail::LogMailSender;
pub use memory::{InMemoryTokenStore, InMemoryUserRepository};
pub use token_store::TokenStoreBackend;

/// Lowest bcrypt cost accepted by the hashing library
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt cost accepted by the hashing library
pub const MAX_BCRYPT_COST: u32 = 31;

/// Verification service over the configured token store
pub type AppVerificationService = VerificationService<TokenStoreBackend>;

/// Account service wired with the infrastructure implementations
pub type AppAccountService = AccountService<InMemoryUserRepository, TokenStoreBackend, LogMailSender>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    pub users: Arc<InMemoryUserRepository>,
    pub token_store: Arc<TokenStoreBackend>,
    pub mail_sender: Arc<LogMailSender>,
    pub verification: Arc<AppVerificationService>,
    pub accounts: Arc<AppAccountService>,
}

/// Initialize infrastructure services
///
/// This function:
/// - Validates the verification and account settings
/// - Connects the configured token store (memory or Redis)
/// - Assembles the verification and account services
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    info!(
        event = "infrastructure_initializing",
        environment = %config.environment,
        token_store = ?config.cache.backend,
        "Initializing infrastructure services"
    );

    validate_config(config)?;

    let token_store = Arc::new(TokenStoreBackend::from_config(&config.cache, &config.verification).await?);
    let users = Arc::new(InMemoryUserRepository::new());
    let mail_sender = Arc::new(LogMailSender::new(config.mail.from_address.clone()));

    let verification = Arc::new(VerificationService::new(
        token_store.clone(),
        VerificationServiceConfig::from(&config.verification),
    ));
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        verification.clone(),
        mail_sender.clone(),
        AccountServiceConfig::from_settings(&config.account, &config.mail),
    ));

    info!(
        event = "infrastructure_initialized",
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        users,
        token_store,
        mail_sender,
        verification,
        accounts,
    })
}

/// Load configuration from the environment and initialize the services
pub async fn initialize_from_env() -> Result<InfrastructureServices, InfrastructureError> {
    let config = AppConfig::load().map_err(|e| InfrastructureError::Config(e.to_string()))?;
    initialize(&config).await
}

fn validate_config(config: &AppConfig) -> Result<(), InfrastructureError> {
    validate_lifetimes(&config.verification)?;

    if config.verification.token_provider.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "Token provider name must not be empty".to_string(),
        ));
    }

    let cost = config.account.bcrypt_cost;
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(InfrastructureError::Config(format!(
            "bcrypt cost must be between {} and {}, got {}",
            MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
        )));
    }

    if config.account.failed_login_reset_threshold == 0 {
        return Err(InfrastructureError::Config(
            "Failed login reset threshold must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_lifetimes(config: &VerificationConfig) -> Result<(), InfrastructureError> {
    let lifetimes = [
        ("email confirmation", config.email_confirmation_lifetime_minutes),
        ("password reset", config.password_reset_lifetime_minutes),
    ];
    for (name, minutes) in lifetimes {
        if minutes <= 0 {
            return Err(InfrastructureError::Config(format!(
                "The {} code lifetime must be positive, got {} minutes",
                name, minutes
            )));
        }
        if minutes > MAX_CODE_LIFETIME_MINUTES {
            return Err(InfrastructureError::Config(format!(
                "The {} code lifetime must be at most {} minutes, got {}",
                name, MAX_CODE_LIFETIME_MINUTES, minutes
            )));
        }
    }
    Ok(())
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail error: {0}")]
    Mail(String),
}
