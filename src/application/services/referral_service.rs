//! Referral link resolution and click attribution.

use std::sync::Arc;

use crate::domain::entities::{Account, NewClick};
use crate::domain::repositories::{AccountRepository, ClickRepository};
use crate::error::AppError;

/// Service resolving referral codes and recording click events.
pub struct ReferralService {
    accounts: Arc<dyn AccountRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl ReferralService {
    /// Creates a new referral service.
    pub fn new(accounts: Arc<dyn AccountRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { accounts, clicks }
    }

    /// Resolves a referral code and records the visit.
    ///
    /// On a known code, appends exactly one click event with best-effort
    /// client metadata and returns the affiliate for the landing view.
    /// An unknown code records nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes,
    /// [`AppError::Internal`] on database errors.
    pub async fn resolve_and_record_click(
        &self,
        code: &str,
        ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Account, AppError> {
        let account = self
            .accounts
            .find_affiliate_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown referral code"))?;

        self.clicks
            .record(NewClick {
                account_id: account.id,
                ip,
                user_agent,
            })
            .await?;

        tracing::debug!(code, affiliate_id = account.id, "referral click recorded");

        Ok(account)
    }
}
