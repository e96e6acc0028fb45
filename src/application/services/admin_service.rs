//! Administrator use-cases: login, aggregate stats, listings, payout
//! adjudication.

use std::sync::Arc;

use crate::application::services::CredentialService;
use crate::domain::entities::{
    Account, ClickWithAffiliate, Payout, PayoutStatus, PayoutWithAffiliate, Role,
};
use crate::domain::repositories::{AccountRepository, ClickRepository, PayoutRepository};
use crate::error::AppError;

/// Cap on the admin click log listing.
const CLICK_LOG_LIMIT: i64 = 100;

/// Aggregate counters shown on the admin overview page.
#[derive(Debug, Clone, Copy)]
pub struct Overview {
    pub affiliate_count: i64,
    pub click_count: i64,
    pub pending_payout_count: i64,
}

/// The two admin decisions on a payout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutDecision {
    Approve,
    Reject,
}

impl PayoutDecision {
    fn status(self) -> PayoutStatus {
        match self {
            PayoutDecision::Approve => PayoutStatus::Approved,
            PayoutDecision::Reject => PayoutStatus::Rejected,
        }
    }
}

/// Service for the admin-facing use-cases.
pub struct AdminService {
    accounts: Arc<dyn AccountRepository>,
    clicks: Arc<dyn ClickRepository>,
    payouts: Arc<dyn PayoutRepository>,
    credentials: Arc<CredentialService>,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        clicks: Arc<dyn ClickRepository>,
        payouts: Arc<dyn PayoutRepository>,
        credentials: Arc<CredentialService>,
    ) -> Self {
        Self {
            accounts,
            clicks,
            payouts,
            credentials,
        }
    }

    /// Authenticates an administrator by email and password.
    ///
    /// Role-scoped like the affiliate login, but the two failure modes
    /// carry distinct messages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on either miss,
    /// [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let account = self
            .accounts
            .find_by_email_and_role(email, Role::Admin)
            .await?
            .ok_or_else(|| AppError::unauthorized("No admin account with that email"))?;

        if !self.credentials.verify(password, &account.password_hash) {
            return Err(AppError::unauthorized("Incorrect password"));
        }

        Ok(account)
    }

    /// Computes the overview counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn overview(&self) -> Result<Overview, AppError> {
        let affiliate_count = self.accounts.count_affiliates().await?;
        let click_count = self.clicks.count_all().await?;
        let pending_payout_count = self.payouts.count_pending().await?;

        Ok(Overview {
            affiliate_count,
            click_count,
            pending_payout_count,
        })
    }

    /// Lists all affiliate accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_affiliates(&self) -> Result<Vec<Account>, AppError> {
        self.accounts.list_affiliates().await
    }

    /// Lists the most recent clicks with their affiliate, capped at 100.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_clicks(&self) -> Result<Vec<ClickWithAffiliate>, AppError> {
        self.clicks.list_recent_with_affiliate(CLICK_LOG_LIMIT).await
    }

    /// Lists all payout requests with their affiliate, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_payouts(&self) -> Result<Vec<PayoutWithAffiliate>, AppError> {
        self.payouts.list_with_affiliate().await
    }

    /// Applies an admin decision to a payout request.
    ///
    /// The write is unconditional: adjudicating an already-processed
    /// request overwrites its status and `processed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown payout id,
    /// [`AppError::Internal`] on database errors.
    pub async fn adjudicate_payout(
        &self,
        id: i64,
        decision: PayoutDecision,
    ) -> Result<Payout, AppError> {
        let payout = self
            .payouts
            .set_status(id, decision.status())
            .await?
            .ok_or_else(|| AppError::not_found("Payout request not found"))?;

        tracing::info!(
            payout_id = payout.id,
            status = %payout.status,
            "payout adjudicated"
        );

        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockAccountRepository, MockClickRepository, MockPayoutRepository,
    };
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn admin(id: i64) -> Account {
        let now = Utc::now();
        Account::new(
            id,
            "Administrator".to_string(),
            "admin@example.com".to_string(),
            "digest".to_string(),
            "admin".to_string(),
            Role::Admin,
            now,
            now,
        )
    }

    fn credentials() -> Arc<CredentialService> {
        Arc::new(CredentialService::new(Arc::new(
            MockAccountRepository::new(),
        )))
    }

    fn service(
        accounts: MockAccountRepository,
        clicks: MockClickRepository,
        payouts: MockPayoutRepository,
    ) -> AdminService {
        AdminService::new(
            Arc::new(accounts),
            Arc::new(clicks),
            Arc::new(payouts),
            credentials(),
        )
    }

    #[tokio::test]
    async fn test_login_unknown_email_has_distinct_message() {
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email_and_role()
            .withf(|email, role| email == "nobody@example.com" && *role == Role::Admin)
            .times(1)
            .returning(|_, _| Ok(None));

        let svc = service(
            mock_accounts,
            MockClickRepository::new(),
            MockPayoutRepository::new(),
        );

        let err = svc.login("nobody@example.com", "pw").await.unwrap_err();

        assert_eq!(err.to_string(), "No admin account with that email");
    }

    #[tokio::test]
    async fn test_login_wrong_password_has_distinct_message() {
        let real_credentials = credentials();
        let digest = real_credentials.hash("right-password").unwrap();

        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email_and_role()
            .times(1)
            .returning(move |_, _| {
                let mut account = admin(9);
                account.password_hash = digest.clone();
                Ok(Some(account))
            });

        let svc = AdminService::new(
            Arc::new(mock_accounts),
            Arc::new(MockClickRepository::new()),
            Arc::new(MockPayoutRepository::new()),
            real_credentials,
        );

        let err = svc.login("admin@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Incorrect password");
    }

    #[tokio::test]
    async fn test_login_succeeds_for_admin_role() {
        let real_credentials = credentials();
        let digest = real_credentials.hash("right-password").unwrap();

        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email_and_role()
            .times(1)
            .returning(move |_, _| {
                let mut account = admin(9);
                account.password_hash = digest.clone();
                Ok(Some(account))
            });

        let svc = AdminService::new(
            Arc::new(mock_accounts),
            Arc::new(MockClickRepository::new()),
            Arc::new(MockPayoutRepository::new()),
            real_credentials,
        );

        let account = svc
            .login("admin@example.com", "right-password")
            .await
            .unwrap();

        assert_eq!(account.id, 9);
        assert!(account.is_admin());
    }

    #[tokio::test]
    async fn test_overview_aggregates_three_counters() {
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_count_affiliates()
            .times(1)
            .returning(|| Ok(12));

        let mut mock_clicks = MockClickRepository::new();
        mock_clicks.expect_count_all().times(1).returning(|| Ok(345));

        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_count_pending()
            .times(1)
            .returning(|| Ok(4));

        let svc = service(mock_accounts, mock_clicks, mock_payouts);

        let overview = svc.overview().await.unwrap();

        assert_eq!(overview.affiliate_count, 12);
        assert_eq!(overview.click_count, 345);
        assert_eq!(overview.pending_payout_count, 4);
    }

    #[tokio::test]
    async fn test_list_clicks_is_capped_at_100() {
        let mut mock_clicks = MockClickRepository::new();
        mock_clicks
            .expect_list_recent_with_affiliate()
            .withf(|limit| *limit == 100)
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(
            MockAccountRepository::new(),
            mock_clicks,
            MockPayoutRepository::new(),
        );

        svc.list_clicks().await.unwrap();
    }

    #[tokio::test]
    async fn test_adjudicate_approve_sets_status() {
        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_set_status()
            .withf(|id, status| *id == 7 && *status == PayoutStatus::Approved)
            .times(1)
            .returning(|id, status| {
                Ok(Some(Payout::new(
                    id,
                    5,
                    Decimal::new(1000, 2),
                    status,
                    Utc::now(),
                    Some(Utc::now()),
                )))
            });

        let svc = service(
            MockAccountRepository::new(),
            MockClickRepository::new(),
            mock_payouts,
        );

        let payout = svc
            .adjudicate_payout(7, PayoutDecision::Approve)
            .await
            .unwrap();

        assert_eq!(payout.status, PayoutStatus::Approved);
        assert!(payout.processed_at.is_some());
    }

    #[tokio::test]
    async fn test_adjudicate_unknown_payout_is_not_found() {
        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_set_status()
            .times(1)
            .returning(|_, _| Ok(None));

        let svc = service(
            MockAccountRepository::new(),
            MockClickRepository::new(),
            mock_payouts,
        );

        let result = svc.adjudicate_payout(999, PayoutDecision::Reject).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_readjudication_overwrites_unconditionally() {
        // The repository write carries no status guard; a rejected
        // request can later be approved and processed_at is restamped.
        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_set_status()
            .withf(|id, status| *id == 7 && *status == PayoutStatus::Approved)
            .times(1)
            .returning(|id, status| {
                Ok(Some(Payout::new(
                    id,
                    5,
                    Decimal::new(1000, 2),
                    status,
                    Utc::now(),
                    Some(Utc::now()),
                )))
            });

        let svc = service(
            MockAccountRepository::new(),
            MockClickRepository::new(),
            mock_payouts,
        );

        let payout = svc
            .adjudicate_payout(7, PayoutDecision::Approve)
            .await
            .unwrap();

        assert_eq!(payout.status, PayoutStatus::Approved);
    }
}
