//! Main account service implementation

use std::sync::Arc;

use ev_shared::validation::{is_valid_email, mask_email};
use uuid::Uuid;

use crate::domain::entities::{Account, VerificationCode, VerificationPurpose};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenStore, UserRepository};
use crate::services::clock::{Clock, SystemClock};
use crate::services::mail::{self, MailMessage, MailSender};
use crate::services::verification::{CodeHasher, IssueOutcome, VerificationService};

use super::config::AccountServiceConfig;
use super::password::PasswordHasher;
use super::types::{EmailConfirmationState, LoginOutcome, PasswordResetState, RegistrationOutcome};

/// Saves of a failed login retried after a concurrent update
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Account state machine driven by verification codes
pub struct AccountService<U, T, M, C = SystemClock>
where
    U: UserRepository,
    T: TokenStore,
    M: MailSender,
    C: Clock,
{
    /// User directory
    user_repository: Arc<U>,
    /// Code issuance and validation
    verification_service: Arc<VerificationService<T, C>>,
    /// Outbound mail
    mail_sender: Arc<M>,
    /// bcrypt hashing with the configured cost
    password_hasher: PasswordHasher,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<U, T, M, C> AccountService<U, T, M, C>
where
    U: UserRepository,
    T: TokenStore,
    M: MailSender,
    C: Clock,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - User directory
    /// * `verification_service` - Verification code engine
    /// * `mail_sender` - Delivers the codes
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<T, C>>,
        mail_sender: Arc<M>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            mail_sender,
            password_hasher: PasswordHasher::new(config.bcrypt_cost),
            config,
        }
    }

    pub fn config(&self) -> &AccountServiceConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Register a new account and mail its confirmation code
    ///
    /// This method:
    /// 1. Validates the email format and the password policy
    /// 2. Rejects a taken user name or email
    /// 3. Stores the account unconfirmed
    /// 4. Issues an email confirmation code (forced) and mails it
    ///
    /// # Returns
    ///
    /// * `Ok(RegistrationOutcome)` - Account created and code delivered
    /// * `Err(DomainError::Delivery)` - Account and code exist but the mail
    ///   failed; a resend replaces the code and mails it
    /// * `Err(DomainError)` - Validation, duplicate or storage failure
    pub async fn register(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<RegistrationOutcome> {
        let user_name = user_name.trim();
        let email = email.trim();

        if user_name.is_empty() {
            return Err(DomainError::validation("User name is required"));
        }
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail.into());
        }
        self.config.password_policy.check(password)?;

        if self
            .user_repository
            .find_by_user_name(user_name)
            .await?
            .is_some()
            || self.user_repository.find_by_email(email).await?.is_some()
        {
            tracing::info!(
                email = %mask_email(email),
                event = "registration_duplicate",
                "Registration rejected for an existing user"
            );
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let account = self
            .user_repository
            .save(Account::new(
                user_name.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;

        tracing::info!(
            user_id = %account.id,
            email = %mask_email(&account.email),
            event = "account_registered",
            "Registered new account"
        );

        let outcome = self
            .verification_service
            .issue_code_with_default_lifetime(&account, VerificationPurpose::EmailConfirmation, true)
            .await?;
        let confirmation_expires_at = outcome.expires_at();
        self.deliver(&account, VerificationPurpose::EmailConfirmation, &outcome)
            .await?;

        Ok(RegistrationOutcome {
            account_id: account.id,
            confirmation_expires_at,
        })
    }

    /// Mail a new confirmation code, replacing any code in flight
    ///
    /// The user has no way to read a code that was never delivered, so a
    /// resend always issues with force. Unknown and already confirmed
    /// addresses are a silent no-op.
    pub async fn resend_email_confirmation(&self, email: &str) -> DomainResult<()> {
        let Some(account) = self.user_repository.find_by_email(email.trim()).await? else {
            tracing::info!(
                email = %mask_email(email),
                event = "confirmation_resend_unknown",
                "Confirmation resend for unknown email"
            );
            return Ok(());
        };
        if account.email_confirmed {
            return Ok(());
        }

        let outcome = self
            .verification_service
            .issue_code_with_default_lifetime(&account, VerificationPurpose::EmailConfirmation, true)
            .await?;
        self.deliver(&account, VerificationPurpose::EmailConfirmation, &outcome)
            .await
    }

    /// Confirm an email address with a code
    ///
    /// The account becomes confirmed (terminal) and only then is the code
    /// revoked, so a failed save leaves the code usable for a retry.
    /// Unknown user, wrong or expired code and token store failures during
    /// the check all yield `Ok(false)`.
    pub async fn confirm_email(&self, user_id: Uuid, code: &str) -> DomainResult<bool> {
        let Some(mut account) = self.find_for_validation(user_id, code).await else {
            return Ok(false);
        };

        if !self
            .validate_fail_closed(user_id, VerificationPurpose::EmailConfirmation, code, false)
            .await
        {
            return Ok(false);
        }

        if !account.email_confirmed {
            account.confirm_email();
            self.user_repository.save(account).await?;
        }
        self.revoke_after_use(user_id, VerificationPurpose::EmailConfirmation)
            .await;

        tracing::info!(
            user_id = %user_id,
            event = "email_confirmed",
            "Email address confirmed"
        );
        Ok(true)
    }

    /// Sign in with email and password
    ///
    /// Failed attempts are counted. When the count reaches the reset
    /// threshold a password reset code is issued without force and mailed
    /// only if it was actually issued, so an active code is never replaced.
    /// Problems on that path are logged and never change the outcome.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let Some(mut account) = self.user_repository.find_by_email(email.trim()).await? else {
            self.password_hasher.verify_dummy(password);
            tracing::warn!(
                email = %mask_email(email),
                event = "login_failed",
                reason = "unknown_email",
                "Login failed"
            );
            return Ok(LoginOutcome::Failed);
        };

        if account.locked_out {
            self.password_hasher.verify_dummy(password);
            tracing::warn!(
                user_id = %account.id,
                event = "login_locked_out",
                "Login refused for locked out account"
            );
            return Ok(LoginOutcome::LockedOut);
        }

        if !self.password_hasher.verify(password, &account.password_hash) {
            return self.handle_failed_login(account).await;
        }

        if self.config.require_confirmed_email && !account.email_confirmed {
            tracing::info!(
                user_id = %account.id,
                event = "login_not_allowed",
                "Login refused until email is confirmed"
            );
            return Ok(LoginOutcome::NotAllowed);
        }

        if account.failed_login_count > 0 {
            account.record_successful_login();
            account = self.user_repository.save(account).await?;
        }

        tracing::info!(
            user_id = %account.id,
            event = "login_succeeded",
            "Login succeeded"
        );
        Ok(LoginOutcome::Succeeded {
            account_id: account.id,
        })
    }

    /// Mail a password reset code unless one is already in flight
    ///
    /// An unknown email is a silent `Ok(())`. Storage and delivery failures
    /// propagate.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let Some(account) = self.user_repository.find_by_email(email.trim()).await? else {
            tracing::info!(
                email = %mask_email(email),
                event = "reset_request_unknown",
                "Password reset requested for unknown email"
            );
            return Ok(());
        };

        let outcome = self
            .verification_service
            .issue_code_with_default_lifetime(&account, VerificationPurpose::PasswordReset, false)
            .await?;
        self.deliver(&account, VerificationPurpose::PasswordReset, &outcome)
            .await
    }

    /// Check a reset code without consuming it
    pub async fn verify_password_reset_code(&self, user_id: Uuid, code: &str) -> DomainResult<bool> {
        if self.find_for_validation(user_id, code).await.is_none() {
            return Ok(false);
        }
        Ok(self
            .validate_fail_closed(user_id, VerificationPurpose::PasswordReset, code, false)
            .await)
    }

    /// Set a new password with a reset code
    ///
    /// The password policy is checked first so a weak password never burns
    /// the code. The new hash is saved before the code is revoked; if the
    /// save fails the code stays valid. On success the failure counter is
    /// cleared and any lockout lifted.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Password changed
    /// * `Ok(false)` - Unknown user or invalid code
    /// * `Err(AuthError::WeakPassword)` - Policy rejected the password
    /// * `Err(DomainError)` - The account could not be saved; the code is
    ///   still valid
    pub async fn reset_password(
        &self,
        user_id: Uuid,
        code: &str,
        new_password: &str,
    ) -> DomainResult<bool> {
        self.config.password_policy.check(new_password)?;
        let password_hash = self.password_hasher.hash(new_password)?;

        let Some(mut account) = self.find_for_validation(user_id, code).await else {
            return Ok(false);
        };

        if !self
            .validate_fail_closed(user_id, VerificationPurpose::PasswordReset, code, false)
            .await
        {
            return Ok(false);
        }

        account.reset_password(password_hash);
        self.user_repository.save(account).await?;
        self.revoke_after_use(user_id, VerificationPurpose::PasswordReset)
            .await;

        tracing::info!(
            user_id = %user_id,
            event = "password_reset",
            "Password reset completed"
        );
        Ok(true)
    }

    /// Current email confirmation state
    pub async fn email_confirmation_state(
        &self,
        user_id: Uuid,
    ) -> DomainResult<EmailConfirmationState> {
        let account = self.require_account(user_id).await?;
        if account.email_confirmed {
            return Ok(EmailConfirmationState::Confirmed);
        }
        let active = self
            .verification_service
            .has_active_code(user_id, VerificationPurpose::EmailConfirmation)
            .await?;
        Ok(if active {
            EmailConfirmationState::CodeActive
        } else {
            EmailConfirmationState::Unconfirmed
        })
    }

    /// Whether a password reset code is in flight
    pub async fn password_reset_state(&self, user_id: Uuid) -> DomainResult<PasswordResetState> {
        self.require_account(user_id).await?;
        let active = self
            .verification_service
            .has_active_code(user_id, VerificationPurpose::PasswordReset)
            .await?;
        Ok(if active {
            PasswordResetState::CodeActive
        } else {
            PasswordResetState::NoActiveCode
        })
    }

    /// Count a bad password. A concurrent write to the same account makes
    /// the save fail with `Conflict`; the account is then reloaded and the
    /// failure applied again so no attempt is lost.
    async fn handle_failed_login(&self, mut account: Account) -> DomainResult<LoginOutcome> {
        let user_id = account.id;
        let mut attempt = 1;
        let (account, failed, lock) = loop {
            let failed = account.record_failed_login();
            let lock = self
                .config
                .lockout_threshold
                .is_some_and(|threshold| failed >= threshold);
            if lock {
                account.lock_out();
            }
            match self.user_repository.save(account).await {
                Ok(saved) => break (saved, failed, lock),
                Err(DomainError::Conflict { .. }) if attempt < MAX_SAVE_ATTEMPTS => {
                    tracing::debug!(
                        user_id = %user_id,
                        attempt,
                        event = "failed_login_save_conflict",
                        "Account changed concurrently, reloading"
                    );
                    attempt += 1;
                    account = self.require_account(user_id).await?;
                }
                Err(e) => return Err(e),
            }
        };

        tracing::warn!(
            user_id = %account.id,
            failed_login_count = failed,
            event = "login_failed",
            reason = "bad_password",
            "Login failed"
        );

        if failed >= self.config.failed_login_reset_threshold {
            self.auto_issue_reset_code(&account).await;
        }

        if lock {
            tracing::warn!(
                user_id = %account.id,
                event = "account_locked_out",
                "Account locked out after repeated failures"
            );
            return Ok(LoginOutcome::LockedOut);
        }
        Ok(LoginOutcome::Failed)
    }

    // Repeated failures offer a reset code to the registered address without
    // a request from the user. An active code is left alone.
    async fn auto_issue_reset_code(&self, account: &Account) {
        let outcome = match self
            .verification_service
            .issue_code_with_default_lifetime(account, VerificationPurpose::PasswordReset, false)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    user_id = %account.id,
                    error = %e,
                    event = "reset_code_auto_issue_failed",
                    "Could not issue reset code after failed logins"
                );
                return;
            }
        };

        if outcome.is_issued() {
            tracing::info!(
                user_id = %account.id,
                event = "reset_code_auto_issued",
                "Issued reset code after repeated failed logins"
            );
        }

        if let Err(e) = self
            .deliver(account, VerificationPurpose::PasswordReset, &outcome)
            .await
        {
            tracing::warn!(
                user_id = %account.id,
                error = %e,
                event = "reset_code_auto_delivery_failed",
                "Could not mail reset code after failed logins"
            );
        }
    }

    /// Mail a freshly issued code; `AlreadyActive` sends nothing
    async fn deliver(
        &self,
        account: &Account,
        purpose: VerificationPurpose,
        outcome: &IssueOutcome,
    ) -> DomainResult<()> {
        let Some(code) = outcome.code() else {
            return Ok(());
        };

        self.message_for(account, purpose, code)
            .send_with(self.mail_sender.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %account.id,
                    email = %mask_email(&account.email),
                    purpose = %purpose,
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::delivery(format!("Failed to send {} code: {}", purpose, e))
            })?;

        tracing::info!(
            user_id = %account.id,
            email = %mask_email(&account.email),
            purpose = %purpose,
            event = "code_delivered",
            "Verification code mailed"
        );
        Ok(())
    }

    fn message_for(
        &self,
        account: &Account,
        purpose: VerificationPurpose,
        code: &VerificationCode,
    ) -> MailMessage {
        let minutes = self.verification_service.lifetime_for(purpose).num_minutes();
        match purpose {
            VerificationPurpose::EmailConfirmation => {
                mail::email_confirmation(&self.config.app_name, &account.email, code, minutes)
            }
            VerificationPurpose::PasswordReset => {
                mail::password_reset(&self.config.app_name, &account.email, code, minutes)
            }
        }
    }

    /// Account lookup for code validation. A missing account or a lookup
    /// failure still hashes the code, then yields `None`.
    async fn find_for_validation(&self, user_id: Uuid, code: &str) -> Option<Account> {
        match self.user_repository.find_by_id(user_id).await {
            Ok(Some(account)) => Some(account),
            Ok(None) => {
                std::hint::black_box(CodeHasher::hash(code.trim()));
                tracing::info!(
                    user_id = %user_id,
                    event = "code_check_unknown_user",
                    "Code submitted for unknown user"
                );
                None
            }
            Err(e) => {
                std::hint::black_box(CodeHasher::hash(code.trim()));
                tracing::error!(
                    user_id = %user_id,
                    error = %e,
                    event = "code_check_lookup_failed",
                    "User lookup failed during code check"
                );
                None
            }
        }
    }

    /// Drop a code once its effect is saved. The change already happened, so
    /// a failure here is logged and the code simply lives out its lifetime.
    async fn revoke_after_use(&self, user_id: Uuid, purpose: VerificationPurpose) {
        if let Err(e) = self.verification_service.revoke(user_id, purpose).await {
            tracing::error!(
                user_id = %user_id,
                purpose = %purpose,
                error = %e,
                event = "code_revoke_failed",
                "Could not revoke used verification code"
            );
        }
    }

    /// Validation where a token store failure counts as an invalid code
    async fn validate_fail_closed(
        &self,
        user_id: Uuid,
        purpose: VerificationPurpose,
        code: &str,
        consume: bool,
    ) -> bool {
        match self
            .verification_service
            .validate(user_id, purpose, code, consume)
            .await
        {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    purpose = %purpose,
                    error = %e,
                    event = "code_check_failed_closed",
                    "Token store failure during validation, treating code as invalid"
                );
                false
            }
        }
    }

    async fn require_account(&self, user_id: Uuid) -> DomainResult<Account> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", user_id),
            })
    }
}
