//! In-memory token store

use std::collections::HashMap;

use async_trait::async_trait;
use ev_core::repositories::TokenStore;
use tokio::sync::RwLock;

type TokenKey = (String, String, String);

/// Token store backed by a map keyed on (user, provider, purpose)
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<HashMap<TokenKey, String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    fn key(user_id: &str, provider: &str, purpose: &str) -> TokenKey {
        (user_id.to_string(), provider.to_string(), purpose.to_string())
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, user_id: &str, provider: &str, purpose: &str) -> Result<Option<String>, String> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&Self::key(user_id, provider, purpose)).cloned())
    }

    async fn set(&self, user_id: &str, provider: &str, purpose: &str, value: &str) -> Result<(), String> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(Self::key(user_id, provider, purpose), value.to_string());
        Ok(())
    }

    async fn remove(&self, user_id: &str, provider: &str, purpose: &str) -> Result<(), String> {
        let mut tokens = self.tokens.write().await;
        tokens.remove(&Self::key(user_id, provider, purpose));
        Ok(())
    }
}
