//! Integration tests for the verification engine and the account state machine

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use ev_core::{
    Account, AccountService, AccountServiceConfig, DomainError, LoginOutcome, MailSender,
    ManualClock, TokenStore, UserRepository, VerificationPurpose, VerificationService,
    VerificationServiceConfig,
};

// In-memory token store
#[derive(Default)]
struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    fn raw(&self, user_id: Uuid, purpose: VerificationPurpose) -> Option<String> {
        let key = format!("{}:EmailCode:{}", user_id, purpose.as_str());
        self.values.lock().unwrap().get(&key).cloned()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, user_id: &str, provider: &str, purpose: &str) -> Result<Option<String>, String> {
        let key = format!("{}:{}:{}", user_id, provider, purpose);
        Ok(self.values.lock().unwrap().get(&key).cloned())
    }

    async fn set(&self, user_id: &str, provider: &str, purpose: &str, value: &str) -> Result<(), String> {
        let key = format!("{}:{}:{}", user_id, provider, purpose);
        self.values.lock().unwrap().insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, user_id: &str, provider: &str, purpose: &str) -> Result<(), String> {
        let key = format!("{}:{}:{}", user_id, provider, purpose);
        self.values.lock().unwrap().remove(&key);
        Ok(())
    }
}

// In-memory user directory
#[derive(Default)]
struct MemoryUsers {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.has_email(email)).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.user_name == user_name).cloned())
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.get(&account.id).is_some_and(|stored| stored.version != account.version) {
            return Err(DomainError::conflict(format!("account {}", account.id)));
        }
        let mut saved = account;
        saved.version += 1;
        accounts.insert(saved.id, saved.clone());
        Ok(saved)
    }
}

// Mail sender keeping the codes it was asked to deliver
#[derive(Default)]
struct Outbox {
    codes: Mutex<Vec<(String, String)>>,
}

impl Outbox {
    fn count(&self) -> usize {
        self.codes.lock().unwrap().len()
    }

    fn last(&self) -> Option<(String, String)> {
        self.codes.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MailSender for Outbox {
    async fn send(&self, _to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let code = html_body
            .split('>')
            .filter_map(|part| part.split('<').next())
            .find(|text| text.len() == 6 && text.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| "no code in body".to_string())?;
        self.codes
            .lock()
            .unwrap()
            .push((subject.to_string(), code.to_string()));
        Ok(())
    }
}

struct World {
    accounts: AccountService<MemoryUsers, MemoryTokenStore, Outbox, ManualClock>,
    tokens: Arc<MemoryTokenStore>,
    users: Arc<MemoryUsers>,
    outbox: Arc<Outbox>,
    clock: Arc<ManualClock>,
}

fn world() -> World {
    let tokens = Arc::new(MemoryTokenStore::default());
    let users = Arc::new(MemoryUsers::default());
    let outbox = Arc::new(Outbox::default());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
    ));
    let verification = Arc::new(VerificationService::with_clock(
        tokens.clone(),
        clock.clone(),
        VerificationServiceConfig::default(),
    ));
    let config = AccountServiceConfig {
        bcrypt_cost: 4,
        ..AccountServiceConfig::default()
    };
    let accounts = AccountService::new(users.clone(), verification, outbox.clone(), config);

    World {
        accounts,
        tokens,
        users,
        outbox,
        clock,
    }
}

#[tokio::test]
async fn test_fresh_account_confirms_email_with_issued_code() {
    let w = world();

    let registration = w
        .accounts
        .register("maria", "maria@example.com", "S3cure!pass")
        .await
        .unwrap();
    let (subject, code) = w.outbox.last().unwrap();
    assert_eq!(subject, "Confirm your email");

    let confirmed = w
        .accounts
        .confirm_email(registration.account_id, &code)
        .await
        .unwrap();

    assert!(confirmed);
    let account = w
        .users
        .find_by_id(registration.account_id)
        .await
        .unwrap()
        .unwrap();
    assert!(account.email_confirmed);
    assert!(w
        .tokens
        .raw(account.id, VerificationPurpose::EmailConfirmation)
        .is_none());
}

#[tokio::test]
async fn test_password_reset_code_expires_after_fifteen_minutes() {
    let w = world();
    let id = w
        .accounts
        .register("maria", "maria@example.com", "S3cure!pass")
        .await
        .unwrap()
        .account_id;

    w.accounts.forgot_password("maria@example.com").await.unwrap();
    let (subject, code) = w.outbox.last().unwrap();
    assert_eq!(subject, "Reset your password");

    w.clock.advance(Duration::minutes(15) + Duration::seconds(1));

    assert!(!w.accounts.verify_password_reset_code(id, &code).await.unwrap());
    assert!(w.tokens.raw(id, VerificationPurpose::PasswordReset).is_none());
}

#[tokio::test]
async fn test_repeated_login_failures_issue_one_reset_code() {
    let w = world();
    let id = w
        .accounts
        .register("maria", "maria@example.com", "S3cure!pass")
        .await
        .unwrap()
        .account_id;
    assert_eq!(w.outbox.count(), 1);

    for _ in 0..2 {
        let outcome = w.accounts.login("maria@example.com", "nope").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Failed);
    }
    assert_eq!(w.outbox.count(), 2);
    let (subject, _) = w.outbox.last().unwrap();
    assert_eq!(subject, "Reset your password");
    let stored = w.tokens.raw(id, VerificationPurpose::PasswordReset);
    assert!(stored.is_some());

    let outcome = w.accounts.login("maria@example.com", "nope").await.unwrap();

    assert_eq!(outcome, LoginOutcome::Failed);
    assert_eq!(w.outbox.count(), 2);
    assert_eq!(w.tokens.raw(id, VerificationPurpose::PasswordReset), stored);
}

#[tokio::test]
async fn test_auto_issued_reset_code_changes_password() {
    let w = world();
    let id = w
        .accounts
        .register("maria", "maria@example.com", "S3cure!pass")
        .await
        .unwrap()
        .account_id;
    w.accounts.login("maria@example.com", "nope").await.unwrap();
    w.accounts.login("maria@example.com", "nope").await.unwrap();
    let (_, code) = w.outbox.last().unwrap();

    assert!(w
        .accounts
        .reset_password(id, &code, "Brand!n3w")
        .await
        .unwrap());

    assert_eq!(
        w.accounts.login("maria@example.com", "Brand!n3w").await.unwrap(),
        LoginOutcome::Succeeded { account_id: id }
    );
    let account = w.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(account.failed_login_count, 0);
}
