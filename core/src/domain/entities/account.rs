//! Account entity driven by the verification state machine.

use chrono::{DateTime, Utc};
use ev_shared::validation::normalize_email;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier, also the user part of token store keys
    pub id: Uuid,

    /// Display / sign-in name, unique
    pub user_name: String,

    /// Delivery address for verification codes, unique after normalisation
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Set only by consuming a valid email confirmation code
    pub email_confirmed: bool,

    /// Consecutive failed sign-in attempts
    pub failed_login_count: u32,

    /// Whether sign-in is refused until a password reset
    pub locked_out: bool,

    /// Bumped by the directory on every save; a save carrying an older
    /// version is rejected as a conflict
    #[serde(default)]
    pub version: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new, unconfirmed account
    pub fn new(user_name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_name,
            email,
            password_hash,
            email_confirmed: false,
            failed_login_count: 0,
            locked_out: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether codes can be delivered to this account
    pub fn has_delivery_address(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Email match after trimming and Unicode lowercasing
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }

    /// Marks the email address as confirmed
    pub fn confirm_email(&mut self) {
        self.email_confirmed = true;
        self.touch();
    }

    /// Records a failed sign-in and returns the new consecutive count
    pub fn record_failed_login(&mut self) -> u32 {
        self.failed_login_count = self.failed_login_count.saturating_add(1);
        self.touch();
        self.failed_login_count
    }

    /// Records a successful sign-in
    pub fn record_successful_login(&mut self) {
        self.failed_login_count = 0;
        self.touch();
    }

    /// Refuses further sign-ins until a password reset
    pub fn lock_out(&mut self) {
        self.locked_out = true;
        self.touch();
    }

    /// Replaces the password after a verified reset; clears the failure
    /// counter and any lockout
    pub fn reset_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.failed_login_count = 0;
        self.locked_out = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
