//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::VerificationCode;

/// Result of a code issuance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// A new code was stored; deliver it
    Issued {
        code: VerificationCode,
        expires_at: DateTime<Utc>,
    },
    /// A valid code is already in flight and was left untouched; send nothing
    AlreadyActive { expires_at: DateTime<Utc> },
}

impl IssueOutcome {
    pub fn is_issued(&self) -> bool {
        matches!(self, IssueOutcome::Issued { .. })
    }

    /// The plaintext to deliver, only for a fresh issuance
    pub fn code(&self) -> Option<&VerificationCode> {
        match self {
            IssueOutcome::Issued { code, .. } => Some(code),
            IssueOutcome::AlreadyActive { .. } => None,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        match self {
            IssueOutcome::Issued { expires_at, .. } | IssueOutcome::AlreadyActive { expires_at } => {
                *expires_at
            }
        }
    }
}

/// Detailed result of checking a submitted code.
///
/// Only `Valid` passes. The other variants exist for logs and tests and all
/// collapse to the same outward "invalid or expired code".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    Valid,
    /// No token stored for the user and purpose
    Missing,
    /// Stored payload could not be parsed
    Malformed,
    /// Token was past expiry and has been purged
    Expired,
    /// Hash did not match
    Mismatch,
}

impl CodeCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, CodeCheck::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeCheck::Valid => "valid",
            CodeCheck::Missing => "missing",
            CodeCheck::Malformed => "malformed",
            CodeCheck::Expired => "expired",
            CodeCheck::Mismatch => "mismatch",
        }
    }
}
