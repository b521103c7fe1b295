//! Unit tests for mock user repository

use crate::domain::entities::Account;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

fn account(name: &str, email: &str) -> Account {
    Account::new(name.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_mock_repository_save_and_find() {
    let repo = MockUserRepository::new();
    let user = account("alice", "alice@example.com");

    let saved = repo.save(user.clone()).await.unwrap();
    assert_eq!(saved.id, user.id);

    let found = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(user.id));
}

#[tokio::test]
async fn test_mock_repository_find_by_email_ignores_case() {
    let repo = MockUserRepository::with_account(account("bob", "Bob@Example.com"));

    let found = repo.find_by_email("bob@example.COM").await.unwrap();
    assert!(found.is_some());
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_repository_find_by_user_name() {
    let repo = MockUserRepository::with_account(account("carol", "carol@example.com"));

    assert!(repo.find_by_user_name("carol").await.unwrap().is_some());
    assert!(repo.find_by_user_name("dave").await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_repository_save_replaces() {
    let mut user = account("erin", "erin@example.com");
    let repo = MockUserRepository::with_account(user.clone());

    user.confirm_email();
    repo.save(user.clone()).await.unwrap();

    assert!(repo.get(user.id).unwrap().email_confirmed);
}

#[tokio::test]
async fn test_mock_repository_failures() {
    let repo = MockUserRepository::new();
    repo.set_fail_reads(true);
    repo.set_fail_writes(true);

    let read = repo.find_by_email("x@example.com").await;
    assert!(matches!(read, Err(DomainError::Storage { .. })));

    let write = repo.save(account("frank", "frank@example.com")).await;
    assert!(matches!(write, Err(DomainError::Storage { .. })));
}

#[tokio::test]
async fn test_mock_repository_save_bumps_version() {
    let repo = MockUserRepository::new();

    let first = repo.save(account("gina", "gina@example.com")).await.unwrap();
    assert_eq!(first.version, 1);

    let second = repo.save(first).await.unwrap();
    assert_eq!(second.version, 2);
    assert_eq!(repo.get(second.id).unwrap().version, 2);
}

#[tokio::test]
async fn test_mock_repository_rejects_stale_save() {
    let repo = MockUserRepository::new();
    let saved = repo.save(account("hugo", "hugo@example.com")).await.unwrap();
    let id = saved.id;
    let mut stale = saved.clone();

    let mut fresh = saved;
    fresh.record_failed_login();
    repo.save(fresh).await.unwrap();

    stale.confirm_email();
    let result = repo.save(stale).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    let stored = repo.get(id).unwrap();
    assert_eq!(stored.failed_login_count, 1);
    assert!(!stored.email_confirmed);
}

#[tokio::test]
async fn test_mock_repository_interference_runs_once() {
    let repo = MockUserRepository::new();
    let saved = repo.save(account("ines", "ines@example.com")).await.unwrap();

    repo.interfere_before_next_save(|stored| {
        stored.record_failed_login();
    });
    assert!(matches!(
        repo.save(saved.clone()).await,
        Err(DomainError::Conflict { .. })
    ));

    let reloaded = repo.get(saved.id).unwrap();
    assert_eq!(reloaded.failed_login_count, 1);
    assert!(repo.save(reloaded).await.is_ok());
}
