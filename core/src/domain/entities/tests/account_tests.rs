//! Unit tests for the account entity

use crate::domain::entities::Account;

fn account() -> Account {
    Account::new(
        "ana".to_string(),
        "Ana@Example.com".to_string(),
        "$2b$04$hash".to_string(),
    )
}

#[test]
fn test_new_account_is_unconfirmed() {
    let account = account();
    assert!(!account.email_confirmed);
    assert_eq!(account.failed_login_count, 0);
    assert!(!account.locked_out);
    assert!(account.has_delivery_address());
}

#[test]
fn test_email_match_is_case_insensitive() {
    let account = account();
    assert!(account.has_email("ana@example.com"));
    assert!(account.has_email(" ANA@EXAMPLE.COM "));
    assert!(!account.has_email("ana@example.org"));
}

#[test]
fn test_failed_login_counter() {
    let mut account = account();
    assert_eq!(account.record_failed_login(), 1);
    assert_eq!(account.record_failed_login(), 2);

    account.record_successful_login();
    assert_eq!(account.failed_login_count, 0);
}

#[test]
fn test_reset_password_clears_failures_and_lockout() {
    let mut account = account();
    account.record_failed_login();
    account.record_failed_login();
    account.lock_out();

    account.reset_password("$2b$04$other".to_string());

    assert_eq!(account.password_hash, "$2b$04$other");
    assert_eq!(account.failed_login_count, 0);
    assert!(!account.locked_out);
}

#[test]
fn test_blank_email_has_no_delivery_address() {
    let mut account = account();
    account.email = "   ".to_string();
    assert!(!account.has_delivery_address());
}

#[test]
fn test_password_hash_is_not_serialized() {
    let account = account();
    let json = serde_json::to_string(&account).unwrap();
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("$2b$04$hash"));
    assert!(json.contains("\"email_confirmed\":false"));
}

#[test]
fn test_email_match_folds_non_ascii_case() {
    let account = Account::new(
        "elodie".to_string(),
        "ÉLODIE@Example.com".to_string(),
        "$2b$04$hash".to_string(),
    );
    assert!(account.has_email("élodie@example.com"));
    assert!(!account.has_email("elodie@example.com"));
}

#[test]
fn test_new_account_starts_at_version_zero() {
    assert_eq!(account().version, 0);
}
