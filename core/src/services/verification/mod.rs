//! Verification code engine
//!
//! This module provides the one-time code workflow used for email
//! confirmation and password reset:
//! - Code generation from the OS CSPRNG
//! - Hashed storage with expiry in a per-user token store
//! - "One in-flight code" throttling for non-forced issuance
//! - Constant-time validation with optional single-use consumption

mod codec;
mod config;
mod hasher;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use codec::{CodeCodec, CodecError};
pub use config::VerificationServiceConfig;
pub use hasher::CodeHasher;
pub use service::VerificationService;
pub use types::{CodeCheck, IssueOutcome};
