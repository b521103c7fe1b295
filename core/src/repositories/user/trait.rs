//! User directory trait defining the interface for account persistence.
//!
//! The account state machine is the only writer. Implementations decide how
//! accounts are stored; the core only needs lookups by id and by email plus
//! a whole-record save.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use ev_core::repositories::UserRepository;
/// use ev_core::domain::entities::Account;
/// use ev_core::errors::DomainError;
///
/// struct PostgresUserRepository {
///     // connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PostgresUserRepository {
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     async fn save(&self, account: Account) -> Result<Account, DomainError> {
///         Ok(account)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its identifier
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by email address, compared after
    /// `ev_shared::validation::normalize_email`
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by user name (exact match)
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Account>, DomainError>;

    /// Insert or replace the account with the same id
    ///
    /// Replacing requires `account.version` to equal the stored version,
    /// otherwise `DomainError::Conflict` is returned and nothing is written.
    /// The returned account carries the incremented version.
    async fn save(&self, account: Account) -> Result<Account, DomainError>;
}
