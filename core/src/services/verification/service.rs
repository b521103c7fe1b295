//! Main verification service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{Account, StoredToken, VerificationCode, VerificationPurpose};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::TokenStore;
use crate::services::clock::{Clock, SystemClock};

use super::codec::CodeCodec;
use super::config::VerificationServiceConfig;
use super::hasher::CodeHasher;
use super::types::{CodeCheck, IssueOutcome};

/// Verification service issuing and validating one-time codes
pub struct VerificationService<T: TokenStore, C: Clock = SystemClock> {
    /// Per-user token store holding the hashed codes
    token_store: Arc<T>,
    /// Time source for expiry arithmetic
    clock: Arc<C>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<T: TokenStore> VerificationService<T, SystemClock> {
    /// Create a new verification service on the wall clock
    pub fn new(token_store: Arc<T>, config: VerificationServiceConfig) -> Self {
        Self::with_clock(token_store, Arc::new(SystemClock), config)
    }
}

impl<T: TokenStore, C: Clock> VerificationService<T, C> {
    /// Create a new verification service with an explicit clock
    pub fn with_clock(token_store: Arc<T>, clock: Arc<C>, config: VerificationServiceConfig) -> Self {
        Self {
            token_store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Default lifetime configured for a purpose
    pub fn lifetime_for(&self, purpose: VerificationPurpose) -> Duration {
        self.config.lifetime_for(purpose)
    }

    /// Issue a code for an account
    ///
    /// With `force = false` an unexpired code already in flight is left in
    /// place and `AlreadyActive` is returned, so the caller sends no mail.
    /// Otherwise a fresh code is drawn, hashed and written with exactly one
    /// store write, overwriting any previous token for the purpose.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Issued code or the already-active signal
    /// * `Err(DomainError)` - No delivery address, non-positive lifetime or
    ///   token store failure. Nothing is delivered in any error case.
    pub async fn issue_code(
        &self,
        account: &Account,
        purpose: VerificationPurpose,
        lifetime: Duration,
        force: bool,
    ) -> DomainResult<IssueOutcome> {
        if !account.has_delivery_address() {
            tracing::warn!(
                user_id = %account.id,
                purpose = %purpose,
                event = "code_issue_rejected",
                "Account has no delivery address"
            );
            return Err(AuthError::MissingDeliveryAddress.into());
        }
        if lifetime <= Duration::zero() {
            return Err(DomainError::validation(format!(
                "Code lifetime must be positive, got {} seconds",
                lifetime.num_seconds()
            )));
        }

        let user_id = account.id.to_string();
        let now = self.clock.now_epoch_seconds();

        if !force {
            if let Some(active) = self.read_token(&user_id, purpose).await? {
                if let Ok(token) = CodeCodec::decode(&active) {
                    if !token.is_expired_at(now) {
                        tracing::info!(
                            user_id = %account.id,
                            purpose = %purpose,
                            event = "code_already_active",
                            "Verification code already in flight, not reissuing"
                        );
                        return Ok(IssueOutcome::AlreadyActive {
                            expires_at: to_utc(token.expires_at),
                        });
                    }
                }
            }
        }

        let code = VerificationCode::generate();
        let expires_at = now.saturating_add(lifetime.num_seconds());
        let token = StoredToken::new(CodeHasher::hash(code.as_str()), expires_at);

        self.token_store
            .set(
                &user_id,
                &self.config.token_provider,
                purpose.as_str(),
                &CodeCodec::encode(&token),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %account.id,
                    purpose = %purpose,
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                DomainError::storage(format!("Failed to store verification code: {}", e))
            })?;

        tracing::info!(
            user_id = %account.id,
            purpose = %purpose,
            expires_at = expires_at,
            forced = force,
            event = "code_issued",
            "Issued new verification code"
        );

        Ok(IssueOutcome::Issued {
            code,
            expires_at: to_utc(expires_at),
        })
    }

    /// Issue a code with the configured lifetime for its purpose
    pub async fn issue_code_with_default_lifetime(
        &self,
        account: &Account,
        purpose: VerificationPurpose,
        force: bool,
    ) -> DomainResult<IssueOutcome> {
        self.issue_code(account, purpose, self.lifetime_for(purpose), force)
            .await
    }

    /// Check a submitted code and report why it failed, if it did
    ///
    /// This method:
    /// 1. Hashes the submitted code (on every path, so a missing token costs
    ///    the same work as a present one)
    /// 2. Fetches and decodes the stored token
    /// 3. Purges the token if it has expired
    /// 4. Compares hashes in fixed time
    /// 5. Removes the token on success when `consume` is set
    ///
    /// Only token store I/O failure is an error; every other failure is an
    /// ordinary non-`Valid` result.
    pub async fn check_code(
        &self,
        user_id: Uuid,
        purpose: VerificationPurpose,
        submitted_code: &str,
        consume: bool,
    ) -> DomainResult<CodeCheck> {
        let submitted_hash = CodeHasher::hash(submitted_code.trim());
        let user_key = user_id.to_string();

        let Some(payload) = self.read_token(&user_key, purpose).await? else {
            tracing::info!(
                user_id = %user_id,
                purpose = %purpose,
                event = "code_missing",
                "No verification code in flight"
            );
            return Ok(CodeCheck::Missing);
        };

        let token = match CodeCodec::decode(&payload) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    purpose = %purpose,
                    error = %e,
                    event = "code_malformed",
                    "Stored verification token could not be parsed"
                );
                return Ok(CodeCheck::Malformed);
            }
        };

        if token.is_expired_at(self.clock.now_epoch_seconds()) {
            self.remove_token(&user_key, purpose).await?;
            tracing::info!(
                user_id = %user_id,
                purpose = %purpose,
                event = "code_expired_purged",
                "Verification code expired and was purged"
            );
            return Ok(CodeCheck::Expired);
        }

        if !CodeHasher::constant_time_equal(&token.hash_hex, &submitted_hash) {
            tracing::warn!(
                user_id = %user_id,
                purpose = %purpose,
                event = "code_mismatch",
                "Submitted verification code does not match"
            );
            return Ok(CodeCheck::Mismatch);
        }

        if consume {
            self.remove_token(&user_key, purpose).await?;
            tracing::info!(
                user_id = %user_id,
                purpose = %purpose,
                event = "code_consumed",
                "Verification code validated and consumed"
            );
        } else {
            tracing::info!(
                user_id = %user_id,
                purpose = %purpose,
                event = "code_validated",
                "Verification code validated"
            );
        }

        Ok(CodeCheck::Valid)
    }

    /// Validate a submitted code
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Code matches an unexpired token (removed if `consume`)
    /// * `Ok(false)` - Missing, malformed, expired or wrong code
    /// * `Err(DomainError::Storage)` - Token store failure
    pub async fn validate(
        &self,
        user_id: Uuid,
        purpose: VerificationPurpose,
        submitted_code: &str,
        consume: bool,
    ) -> DomainResult<bool> {
        self.check_code(user_id, purpose, submitted_code, consume)
            .await
            .map(|check| check.is_valid())
    }

    /// Whether an unexpired code is in flight. An expired token found here is
    /// purged, the same as during validation.
    pub async fn has_active_code(
        &self,
        user_id: Uuid,
        purpose: VerificationPurpose,
    ) -> DomainResult<bool> {
        let user_key = user_id.to_string();
        let Some(payload) = self.read_token(&user_key, purpose).await? else {
            return Ok(false);
        };
        let Ok(token) = CodeCodec::decode(&payload) else {
            return Ok(false);
        };
        if token.is_expired_at(self.clock.now_epoch_seconds()) {
            self.remove_token(&user_key, purpose).await?;
            tracing::info!(
                user_id = %user_id,
                purpose = %purpose,
                event = "code_expired_purged",
                "Verification code expired and was purged"
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Drop any code in flight for the user and purpose
    pub async fn revoke(&self, user_id: Uuid, purpose: VerificationPurpose) -> DomainResult<()> {
        tracing::info!(
            user_id = %user_id,
            purpose = %purpose,
            event = "code_revoked",
            "Revoking verification code"
        );
        self.remove_token(&user_id.to_string(), purpose).await
    }

    async fn read_token(
        &self,
        user_id: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<Option<String>> {
        self.token_store
            .get(user_id, &self.config.token_provider, purpose.as_str())
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = user_id,
                    purpose = %purpose,
                    error = %e,
                    event = "code_read_failed",
                    "Failed to read verification code"
                );
                DomainError::storage(format!("Failed to read verification code: {}", e))
            })
    }

    async fn remove_token(&self, user_id: &str, purpose: VerificationPurpose) -> DomainResult<()> {
        self.token_store
            .remove(user_id, &self.config.token_provider, purpose.as_str())
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = user_id,
                    purpose = %purpose,
                    error = %e,
                    event = "code_remove_failed",
                    "Failed to remove verification code"
                );
                DomainError::storage(format!("Failed to remove verification code: {}", e))
            })
    }
}

fn to_utc(epoch_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(epoch_seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
