//! Repository trait for account data access.

use crate::domain::entities::{Account, NewAccount, Role};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for affiliate and administrator accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or referral code is
    /// already taken, [`AppError::Internal`] on database errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds an account by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Finds an account by email, regardless of role.
    ///
    /// Used by registration to enforce global email uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Finds an account by email restricted to a role.
    ///
    /// Both login paths use this so that an affiliate can never
    /// authenticate against the admin flow and vice versa.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email_and_role(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<Account>, AppError>;

    /// Finds an affiliate-role account by its referral code.
    ///
    /// Returns `Ok(None)` for unknown codes and for codes belonging to
    /// non-affiliate accounts (the admin sentinel never resolves).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_affiliate_by_code(&self, code: &str) -> Result<Option<Account>, AppError>;

    /// Replaces an account's referral code.
    ///
    /// Second half of the two-step registration sequence: the final code
    /// is derived from the store-assigned id and written back here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new code is already taken,
    /// [`AppError::NotFound`] if the account does not exist,
    /// [`AppError::Internal`] on database errors.
    async fn update_referral_code(&self, id: i64, code: &str) -> Result<Account, AppError>;

    /// Lists all affiliate accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_affiliates(&self) -> Result<Vec<Account>, AppError>;

    /// Counts affiliate accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_affiliates(&self) -> Result<i64, AppError>;
}
