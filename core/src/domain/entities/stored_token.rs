//! Persisted form of an in-flight verification code.

use chrono::{DateTime, TimeZone, Utc};

/// Hash of an issued code together with its expiry.
///
/// One exists per (account, purpose) at most. It is replaced on reissue and
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    /// Lowercase hex SHA-256 of the plaintext code
    pub hash_hex: String,
    /// Expiry as unix epoch seconds
    pub expires_at: i64,
}

impl StoredToken {
    pub fn new(hash_hex: String, expires_at: i64) -> Self {
        Self { hash_hex, expires_at }
    }

    /// A token is expired once `now` reaches its expiry
    pub fn is_expired_at(&self, now_epoch_seconds: i64) -> bool {
        self.expires_at <= now_epoch_seconds
    }

    /// Expiry as a timestamp, `None` if out of chrono's range
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }
}
