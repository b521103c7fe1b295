//! Process-local implementations of the token store and user directory
//!
//! Both keep their state behind a `tokio::sync::RwLock` and lose it on
//! restart. Suitable for development, tests and single-instance deployments.

pub mod token_store;
pub mod user_repository;


pub use token_store::InMemoryTokenStore;
pub use user_repository::InMemoryUserRepository;
