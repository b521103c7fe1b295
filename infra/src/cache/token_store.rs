//! Redis-backed token store

use async_trait::async_trait;
use ev_core::repositories::TokenStore;
use tracing::debug;

use super::{CacheConfig, RedisClient};

/// Keeps one value per (user, provider, purpose) under
/// `[prefix:]token:{provider}:{purpose}:{user}`
///
/// Values are opaque here. When a retention period is set, Redis evicts the
/// key on its own once it has outlived every possible code lifetime, so
/// tokens that are never read again do not pile up.
#[derive(Clone)]
pub struct RedisTokenStore {
    client: RedisClient,
    config: CacheConfig,
    retention_seconds: Option<u64>,
}

impl RedisTokenStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self {
            client,
            config,
            retention_seconds: None,
        }
    }

    /// Let Redis drop keys `seconds` after they were last written
    pub fn with_retention(mut self, seconds: u64) -> Self {
        self.retention_seconds = Some(seconds);
        self
    }

    pub fn retention_seconds(&self) -> Option<u64> {
        self.retention_seconds
    }

    /// Cache key for a token
    pub fn token_key(&self, user_id: &str, provider: &str, purpose: &str) -> String {
        token_key(&self.config, user_id, provider, purpose)
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

pub(crate) fn token_key(config: &CacheConfig, user_id: &str, provider: &str, purpose: &str) -> String {
    config.make_key(&format!("token:{}:{}:{}", provider, purpose, user_id))
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn get(&self, user_id: &str, provider: &str, purpose: &str) -> Result<Option<String>, String> {
        let key = self.token_key(user_id, provider, purpose);
        self.client.get(&key).await.map_err(|e| e.to_string())
    }

    async fn set(&self, user_id: &str, provider: &str, purpose: &str, value: &str) -> Result<(), String> {
        let key = self.token_key(user_id, provider, purpose);
        let result = match self.retention_seconds {
            Some(seconds) => self.client.set_with_expiry(&key, value, seconds).await,
            None => self.client.set(&key, value).await,
        };
        result.map_err(|e| e.to_string())
    }

    async fn remove(&self, user_id: &str, provider: &str, purpose: &str) -> Result<(), String> {
        let key = self.token_key(user_id, provider, purpose);
        let existed = self.client.delete(&key).await.map_err(|e| e.to_string())?;
        debug!(key = %key, existed, "Token removed");
        Ok(())
    }
}
