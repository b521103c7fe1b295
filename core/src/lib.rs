//! # Envision Core
//!
//! Core domain layer for the Envision account verification workflow.
//! This crate contains the domain entities, the verification code engine,
//! the account state machine it drives, collaborator interfaces and error
//! types. Adapters for the collaborators live in `ev_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
