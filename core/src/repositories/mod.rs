//! Collaborator interfaces consumed by the core services.

pub mod token;
pub mod user;

pub use token::TokenStore;
pub use user::UserRepository;

#[cfg(test)]
pub use token::MockTokenStore;
#[cfg(test)]
pub use user::MockUserRepository;
