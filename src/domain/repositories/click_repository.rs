//! Repository trait for click event data access.

use crate::domain::entities::{Click, ClickWithAffiliate, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for recorded referral clicks.
///
/// Clicks are append-only: they are recorded once per successful referral
/// resolution and never updated or deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts all clicks attributed to an affiliate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_affiliate(&self, account_id: i64) -> Result<i64, AppError>;

    /// Counts clicks attributed to an affiliate since a point in time.
    ///
    /// Used for the "today" dashboard counter with `since` at local
    /// midnight.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_affiliate_since(
        &self,
        account_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError>;

    /// Counts every click in the system.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Lists the most recent clicks with their affiliate joined.
    ///
    /// Ordered newest first, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_recent_with_affiliate(
        &self,
        limit: i64,
    ) -> Result<Vec<ClickWithAffiliate>, AppError>;
}
