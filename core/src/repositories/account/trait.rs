//! Account repository trait defining the interface to the account store.
//!
//! Lookups return `Option` rather than treating a missing row as an
//! error: not-found is an expected outcome the engine branches on.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository contract for account persistence.
///
/// Implementations must enforce uniqueness of email and phone number and
/// report a violation as `VerificationError::DuplicateChannel`, so a
/// concurrent registration race resolves to exactly one winner.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by phone number
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether an account exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check whether an account exists with the given phone number
    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError>;

    /// Persist a new account.
    ///
    /// Fails with `DuplicateChannel` if the email or phone number is
    /// already taken.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: Account) -> Result<Account, DomainError>;
}
