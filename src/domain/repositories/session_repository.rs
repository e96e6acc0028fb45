//! Repository trait for browser session data access.

use crate::domain::entities::{NewSession, SessionRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for persisted browser sessions.
///
/// Sessions are looked up by token hash only; the raw cookie token never
/// reaches the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a new session row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_session: NewSession) -> Result<SessionRecord, AppError>;

    /// Finds a session by its token hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, AppError>;

    /// Writes the affiliate identity slot; `None` clears it.
    ///
    /// The admin slot is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_affiliate(
        &self,
        session_id: i64,
        affiliate_id: Option<i64>,
    ) -> Result<(), AppError>;

    /// Writes the admin identity slot; `None` clears it.
    ///
    /// The affiliate slot is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_admin(&self, session_id: i64, admin_id: Option<i64>) -> Result<(), AppError>;
}
