//! In-memory user directory

use std::collections::HashMap;

use async_trait::async_trait;
use ev_core::domain::Account;
use ev_core::errors::{AuthError, DomainError};
use ev_core::repositories::UserRepository;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// User directory backed by a map keyed on account id
///
/// Email addresses and user names are unique across accounts; saving an
/// account that would collide with another one fails with
/// [`AuthError::UserAlreadyExists`]. Replacing a stored account requires the
/// stored version, otherwise the save fails with [`DomainError::Conflict`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.has_email(email)).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.user_name == user_name).cloned())
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        let collides = accounts.values().any(|other| {
            other.id != account.id
                && ((account.has_delivery_address() && other.has_email(&account.email))
                    || other.user_name == account.user_name)
        });
        if collides {
            return Err(AuthError::UserAlreadyExists.into());
        }

        if let Some(stored) = accounts.get(&account.id) {
            if stored.version != account.version {
                debug!(
                    account_id = %account.id,
                    stored_version = stored.version,
                    version = account.version,
                    "Rejecting stale account save"
                );
                return Err(DomainError::conflict(format!("account {}", account.id)));
            }
        }

        let mut saved = account;
        saved.version += 1;
        debug!(account_id = %saved.id, version = saved.version, "Saving account");
        accounts.insert(saved.id, saved.clone());
        Ok(saved)
    }
}
