//! Token store trait: a per-user key-value slot scoped by provider and purpose.

use async_trait::async_trait;

/// Storage for opaque token values keyed by (user, provider, purpose).
///
/// The verification service keeps one `"<hash>|<expiry>"` payload per key.
/// Implementations must replace a value atomically so readers never observe
/// a torn payload; last writer wins.
///
/// Errors are reported as plain strings and mapped to
/// `DomainError::Storage` by the caller.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the value stored under the key, `None` when absent
    async fn get(&self, user_id: &str, provider: &str, purpose: &str)
        -> Result<Option<String>, String>;

    /// Write or overwrite the value under the key
    async fn set(
        &self,
        user_id: &str,
        provider: &str,
        purpose: &str,
        value: &str,
    ) -> Result<(), String>;

    /// Delete the value under the key; removing an absent key is not an error
    async fn remove(&self, user_id: &str, provider: &str, purpose: &str) -> Result<(), String>;
}
