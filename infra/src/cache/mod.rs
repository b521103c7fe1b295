//! Cache module for the Redis-backed token store
//!
//! Provides the Redis client with connection retry logic and the
//! [`RedisTokenStore`] that keeps verification tokens in Redis.

pub mod redis_client;
pub mod token_store;


pub use redis_client::RedisClient;
pub use token_store::RedisTokenStore;

// Re-export commonly used types
pub use ev_shared::config::cache::CacheConfig;
