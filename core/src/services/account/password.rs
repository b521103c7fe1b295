//! Password strength rules and bcrypt hashing

use ev_shared::config::PasswordPolicyConfig;
use once_cell::sync::OnceCell;

use crate::errors::{AuthError, DomainError, DomainResult};

/// Strength rules a new password must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::from(&PasswordPolicyConfig::default())
    }
}

impl From<&PasswordPolicyConfig> for PasswordPolicy {
    fn from(config: &PasswordPolicyConfig) -> Self {
        Self {
            min_length: config.min_length,
            require_digit: config.require_digit,
            require_lowercase: config.require_lowercase,
            require_uppercase: config.require_uppercase,
            require_non_alphanumeric: config.require_non_alphanumeric,
        }
    }
}

impl PasswordPolicy {
    /// Check a candidate password, reporting every rule it breaks
    pub fn check(&self, password: &str) -> Result<(), AuthError> {
        let mut problems = Vec::new();

        if password.chars().count() < self.min_length {
            problems.push(format!(
                "Passwords must be at least {} characters.",
                self.min_length
            ));
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            problems.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            problems.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            problems.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_alphanumeric()) {
            problems.push("Passwords must have at least one non alphanumeric character.".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AuthError::WeakPassword {
                reason: problems.join(" "),
            })
        }
    }
}

const DUMMY_PASSWORD: &str = "timing-equaliser";

/// bcrypt password hashing
#[derive(Debug)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: OnceCell<String>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    /// `false` for a wrong password or an unreadable stored hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Spend the same work as `verify` against a throwaway hash of the same
    /// cost. Used when the account does not exist or is locked out.
    pub fn verify_dummy(&self, password: &str) {
        let hash = self
            .dummy_hash
            .get_or_init(|| bcrypt::hash(DUMMY_PASSWORD, self.cost).unwrap_or_default());
        let _ = bcrypt::verify(password, hash);
    }

    #[cfg(test)]
    pub(crate) fn has_dummy_hash(&self) -> bool {
        self.dummy_hash.get().is_some()
    }
}
