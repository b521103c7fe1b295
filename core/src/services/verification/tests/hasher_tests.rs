//! Unit tests for code hashing and fixed-time comparison

use crate::services::verification::CodeHasher;

#[test]
fn test_hash_is_deterministic_lowercase_hex() {
    let a = CodeHasher::hash("004217");
    let b = CodeHasher::hash("004217");

    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.bytes().all(|c| c.is_ascii_digit() || (b'a'..=b'f').contains(&c)));
}

#[test]
fn test_hash_known_vector() {
    // SHA-256("123456")
    assert_eq!(
        CodeHasher::hash("123456"),
        "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
    );
}

#[test]
fn test_different_codes_hash_differently() {
    assert_ne!(CodeHasher::hash("000000"), CodeHasher::hash("000001"));
    assert_ne!(CodeHasher::hash("123456"), CodeHasher::hash("654321"));
}

#[test]
fn test_constant_time_equal() {
    let a = CodeHasher::hash("111111");
    let b = CodeHasher::hash("222222");

    assert!(CodeHasher::constant_time_equal(&a, &a));
    assert!(CodeHasher::constant_time_equal(&a, &a.to_uppercase()));
    assert!(!CodeHasher::constant_time_equal(&a, &b));
}

#[test]
fn test_constant_time_equal_rejects_length_and_garbage() {
    let a = CodeHasher::hash("111111");

    assert!(!CodeHasher::constant_time_equal(&a, &a[..62]));
    assert!(!CodeHasher::constant_time_equal(&a, ""));
    assert!(!CodeHasher::constant_time_equal(&a, "not hex"));
    assert!(!CodeHasher::constant_time_equal("abc", "abc"));
}
