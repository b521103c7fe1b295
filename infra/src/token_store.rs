//! Token store selected at startup from [`CacheConfig`]

use async_trait::async_trait;
use ev_core::repositories::TokenStore;
use ev_shared::config::{CacheConfig, CacheType, VerificationConfig};
use tracing::info;

use crate::cache::{RedisClient, RedisTokenStore};
use crate::memory::InMemoryTokenStore;
use crate::InfrastructureError;

/// Extra time Redis keeps a token after the longest code lifetime has passed
const RETENTION_GRACE_SECONDS: u64 = 24 * 60 * 60;

/// The token store backends the services can run on
pub enum TokenStoreBackend {
    Memory(InMemoryTokenStore),
    Redis(RedisTokenStore),
}

impl TokenStoreBackend {
    /// Build the backend named by `cache.backend`
    ///
    /// For Redis this opens the connection, so an unreachable server fails
    /// startup instead of the first issued code.
    pub async fn from_config(
        cache: &CacheConfig,
        verification: &VerificationConfig,
    ) -> Result<Self, InfrastructureError> {
        match cache.backend {
            CacheType::Memory => {
                info!(event = "token_store_selected", backend = "memory", "Using in-memory token store");
                Ok(Self::Memory(InMemoryTokenStore::new()))
            }
            CacheType::Redis => {
                let client = RedisClient::new(cache).await?;
                let retention = retention_seconds(verification);
                info!(
                    event = "token_store_selected",
                    backend = "redis",
                    retention_seconds = retention,
                    "Using Redis token store"
                );
                Ok(Self::Redis(
                    RedisTokenStore::new(client, cache.clone()).with_retention(retention),
                ))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }
}

/// How long Redis keeps a token key: the longest code lifetime plus a grace day
pub(crate) fn retention_seconds(verification: &VerificationConfig) -> u64 {
    let longest_minutes = verification
        .email_confirmation_lifetime_minutes
        .max(verification.password_reset_lifetime_minutes)
        .max(0) as u64;
    longest_minutes
        .saturating_mul(60)
        .saturating_add(RETENTION_GRACE_SECONDS)
}

#[async_trait]
impl TokenStore for TokenStoreBackend {
    async fn get(&self, user_id: &str, provider: &str, purpose: &str) -> Result<Option<String>, String> {
        match self {
            Self::Memory(store) => store.get(user_id, provider, purpose).await,
            Self::Redis(store) => store.get(user_id, provider, purpose).await,
        }
    }

    async fn set(&self, user_id: &str, provider: &str, purpose: &str, value: &str) -> Result<(), String> {
        match self {
            Self::Memory(store) => store.set(user_id, provider, purpose, value).await,
            Self::Redis(store) => store.set(user_id, provider, purpose, value).await,
        }
    }

    async fn remove(&self, user_id: &str, provider: &str, purpose: &str) -> Result<(), String> {
        match self {
            Self::Memory(store) => store.remove(user_id, provider, purpose).await,
            Self::Redis(store) => store.remove(user_id, provider, purpose).await,
        }
    }
}
