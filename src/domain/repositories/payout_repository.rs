//! Repository trait for payout request data access.

use crate::domain::entities::{NewPayout, Payout, PayoutStatus, PayoutWithAffiliate};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for payout requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPayoutRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayoutRepository: Send + Sync {
    /// Creates a payout request in `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_payout: NewPayout) -> Result<Payout, AppError>;

    /// Lists an affiliate's payout requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_affiliate(&self, account_id: i64) -> Result<Vec<Payout>, AppError>;

    /// Lists all payout requests with their affiliate joined, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_with_affiliate(&self) -> Result<Vec<PayoutWithAffiliate>, AppError>;

    /// Counts payout requests still in `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_pending(&self) -> Result<i64, AppError>;

    /// Sets a payout's status and stamps `processed_at` with the store's
    /// current time.
    ///
    /// The write is unconditional with respect to the current status;
    /// callers own the adjudication policy.
    ///
    /// Returns `Ok(None)` if no payout has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_status(
        &self,
        id: i64,
        status: PayoutStatus,
    ) -> Result<Option<Payout>, AppError>;
}
