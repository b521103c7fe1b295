//! Mock implementation of TokenStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::trait_::TokenStore;

type Key = (String, String, String);

fn key(user_id: &str, provider: &str, purpose: &str) -> Key {
    (user_id.to_string(), provider.to_string(), purpose.to_string())
}

/// Mock token store that counts writes and can be told to fail
#[derive(Default)]
pub struct MockTokenStore {
    values: Mutex<HashMap<Key, String>>,
    writes: AtomicUsize,
    removes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_removes: AtomicBool,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value without counting it as a write
    pub fn insert_raw(&self, user_id: &str, provider: &str, purpose: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key(user_id, provider, purpose), value.to_string());
    }

    pub fn raw(&self, user_id: &str, provider: &str, purpose: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap()
            .get(&key(user_id, provider, purpose))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    /// Number of `set` calls that succeeded
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls that succeeded
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn get(
        &self,
        user_id: &str,
        provider: &str,
        purpose: &str,
    ) -> Result<Option<String>, String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("Token store read error".to_string());
        }
        Ok(self.raw(user_id, provider, purpose))
    }

    async fn set(
        &self,
        user_id: &str,
        provider: &str,
        purpose: &str,
        value: &str,
    ) -> Result<(), String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("Token store write error".to_string());
        }
        self.insert_raw(user_id, provider, purpose, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, user_id: &str, provider: &str, purpose: &str) -> Result<(), String> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err("Token store remove error".to_string());
        }
        self.values
            .lock()
            .unwrap()
            .remove(&key(user_id, provider, purpose));
        self.removes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
