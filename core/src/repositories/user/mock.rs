//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Default)]
pub struct MockUserRepository {
    accounts: Mutex<HashMap<Uuid, Account>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    interference: Mutex<Option<Box<dyn FnOnce(&mut Account) + Send>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(account: Account) -> Self {
        let repo = Self::new();
        repo.insert(account);
        repo
    }

    pub fn insert(&self, account: Account) {
        self.accounts.lock().unwrap().insert(account.id, account);
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().unwrap().get(&id).cloned()
    }

    pub fn find_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.has_email(email))
            .cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Run `change` against the stored account right before the next save
    /// checks its version, as if another request had written it first
    pub fn interfere_before_next_save(&self, change: impl FnOnce(&mut Account) + Send + 'static) {
        *self.interference.lock().unwrap() = Some(Box::new(change));
    }

    fn check_read(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::storage("user directory unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.check_read()?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.check_read()?;
        Ok(self.find_email(email))
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Account>, DomainError> {
        self.check_read()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.user_name == user_name).cloned())
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage("user directory unavailable"));
        }
        let interference = self.interference.lock().unwrap().take();
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(change) = interference {
            if let Some(stored) = accounts.get_mut(&account.id) {
                change(stored);
                stored.version += 1;
            }
        }
        if let Some(stored) = accounts.get(&account.id) {
            if stored.version != account.version {
                return Err(DomainError::conflict(format!("account {}", account.id)));
            }
        }
        let mut saved = account;
        saved.version += 1;
        accounts.insert(saved.id, saved.clone());
        Ok(saved)
    }
}
