//! Affiliate use-cases: registration, login, dashboard, payouts.

use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::application::services::CredentialService;
use crate::domain::entities::{Account, NewAccount, NewPayout, Payout, Role};
use crate::domain::repositories::{AccountRepository, ClickRepository, PayoutRepository};
use crate::error::AppError;
use crate::utils::codes::{placeholder_code, referral_code};

/// Aggregated data behind the affiliate dashboard.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub referral_link: String,
    pub total_clicks: i64,
    pub today_clicks: i64,
    /// Payout history, newest first.
    pub payouts: Vec<Payout>,
}

/// Service for the affiliate-facing use-cases.
pub struct AffiliateService {
    accounts: Arc<dyn AccountRepository>,
    clicks: Arc<dyn ClickRepository>,
    payouts: Arc<dyn PayoutRepository>,
    credentials: Arc<CredentialService>,
    base_url: String,
}

impl AffiliateService {
    /// Creates a new affiliate service.
    ///
    /// `base_url` is the public origin referral links are built on.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        clicks: Arc<dyn ClickRepository>,
        payouts: Arc<dyn PayoutRepository>,
        credentials: Arc<CredentialService>,
        base_url: String,
    ) -> Self {
        Self {
            accounts,
            clicks,
            payouts,
            credentials,
            base_url,
        }
    }

    /// Registers a new affiliate account.
    ///
    /// The account is persisted with a placeholder referral code first,
    /// because the final code is derived from the store-assigned id;
    /// a second write replaces the placeholder. The two steps are not
    /// atomic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when any field is blank,
    /// [`AppError::Conflict`] when the email is already registered
    /// (any role), [`AppError::Internal`] on database errors.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
            return Err(AppError::validation("All fields are required"));
        }

        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(
                "An account with this email already exists",
            ));
        }

        let password_hash = self.credentials.hash(password)?;

        let account = self
            .accounts
            .create(NewAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                referral_code: placeholder_code(),
                role: Role::Affiliate,
            })
            .await?;

        let code = referral_code(&account.name, account.id);
        let account = self.accounts.update_referral_code(account.id, &code).await?;

        tracing::info!(affiliate_id = account.id, code, "affiliate registered");

        Ok(account)
    }

    /// Authenticates an affiliate by email and password.
    ///
    /// The lookup is role-scoped: an admin account with the same email
    /// cannot log in here. Unknown email and wrong password share one
    /// generic message so the form does not leak which emails exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on either miss,
    /// [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let account = self
            .accounts
            .find_by_email_and_role(email, Role::Affiliate)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.credentials.verify(password, &account.password_hash) {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(account)
    }

    /// Computes the dashboard view data for an affiliate.
    ///
    /// "Today" counts clicks from local midnight to now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn dashboard(&self, account: &Account) -> Result<DashboardData, AppError> {
        let referral_link = format!(
            "{}/r/{}",
            self.base_url.trim_end_matches('/'),
            account.referral_code
        );

        let total_clicks = self.clicks.count_for_affiliate(account.id).await?;
        let today_clicks = self
            .clicks
            .count_for_affiliate_since(account.id, start_of_local_day())
            .await?;
        let payouts = self.payouts.list_for_affiliate(account.id).await?;

        Ok(DashboardData {
            referral_link,
            total_clicks,
            today_clicks,
            payouts,
        })
    }

    /// Submits a payout request.
    ///
    /// A missing, non-numeric, or non-positive amount is silently
    /// ignored: `Ok(None)` is returned and no record is created, and the
    /// form redirects back without an error message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn request_payout(
        &self,
        account_id: i64,
        raw_amount: Option<&str>,
    ) -> Result<Option<Payout>, AppError> {
        let Some(amount) = raw_amount.and_then(|raw| raw.trim().parse::<Decimal>().ok()) else {
            tracing::debug!(account_id, "payout request ignored: unparseable amount");
            return Ok(None);
        };

        if amount <= Decimal::ZERO {
            tracing::debug!(account_id, %amount, "payout request ignored: non-positive amount");
            return Ok(None);
        }

        let payout = self
            .payouts
            .create(NewPayout { account_id, amount })
            .await?;

        tracing::info!(account_id, payout_id = payout.id, %amount, "payout requested");

        Ok(Some(payout))
    }
}

/// Start of the current local day, as a UTC instant.
fn start_of_local_day() -> DateTime<Utc> {
    let now = Local::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or(now)
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PayoutStatus;
    use crate::domain::repositories::{
        MockAccountRepository, MockClickRepository, MockPayoutRepository,
    };
    use chrono::Utc;

    fn affiliate(id: i64, name: &str, code: &str) -> Account {
        let now = Utc::now();
        Account::new(
            id,
            name.to_string(),
            "asha@example.com".to_string(),
            "digest".to_string(),
            code.to_string(),
            Role::Affiliate,
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
    ) -> AffiliateService {
        AffiliateService::new(
            Arc::new(accounts),
            Arc::new(clicks),
            Arc::new(payouts),
            credentials(),
            "http://localhost:3000".to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_blank_field_is_rejected() {
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts.expect_find_by_email().times(0);
        mock_accounts.expect_create().times(0);

        let svc = service(
            mock_accounts,
            MockClickRepository::new(),
            MockPayoutRepository::new(),
        );

        let result = svc.register("  ", "asha@example.com", "pw").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_creates_nothing() {
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .times(1)
            .returning(|_| Ok(Some(affiliate(3, "Other", "other3456789"))));
        mock_accounts.expect_create().times(0);

        let svc = service(
            mock_accounts,
            MockClickRepository::new(),
            MockPayoutRepository::new(),
        );

        let result = svc
            .register("Asha Rao", "taken@example.com", "password")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_register_two_step_derives_code_from_id() {
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        mock_accounts
            .expect_create()
            .withf(|new_account| {
                new_account.role == Role::Affiliate
                    && new_account.referral_code.starts_with("pending-")
                    && new_account.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|new_account| {
                let mut created = affiliate(1234567, &new_account.name, "placeholder");
                created.referral_code = new_account.referral_code.clone();
                Ok(created)
            });

        mock_accounts
            .expect_update_referral_code()
            .withf(|id, code| {
                *id == 1234567
                    && code.starts_with("asha4567")
                    && code.len() == "asha".len() + 4 + 3
            })
            .times(1)
            .returning(|id, code| Ok(affiliate(id, "Asha Rao", code)));

        let svc = service(
            mock_accounts,
            MockClickRepository::new(),
            MockPayoutRepository::new(),
        );

        let account = svc
            .register("Asha Rao", "asha@example.com", "password")
            .await
            .unwrap();

        assert!(account.referral_code.starts_with("asha4567"));
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_share_message() {
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email_and_role()
            .times(1)
            .returning(|_, _| Ok(None));

        let svc = service(
            mock_accounts,
            MockClickRepository::new(),
            MockPayoutRepository::new(),
        );

        let miss = svc.login("nobody@example.com", "pw").await.unwrap_err();
        assert_eq!(miss.to_string(), "Invalid email or password");

        // Wrong password against a real account: same message.
        let real_credentials = credentials();
        let digest = real_credentials.hash("correct-password").unwrap();
        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email_and_role()
            .withf(|email, role| email == "asha@example.com" && *role == Role::Affiliate)
            .times(1)
            .returning(move |_, _| {
                let mut account = affiliate(5, "Asha Rao", "asha0005123");
                account.password_hash = digest.clone();
                Ok(Some(account))
            });

        let svc = AffiliateService::new(
            Arc::new(mock_accounts),
            Arc::new(MockClickRepository::new()),
            Arc::new(MockPayoutRepository::new()),
            real_credentials,
            "http://localhost:3000".to_string(),
        );

        let wrong = svc.login("asha@example.com", "wrong").await.unwrap_err();
        assert_eq!(wrong.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_succeeds_with_correct_password() {
        let real_credentials = credentials();
        let digest = real_credentials.hash("correct-password").unwrap();

        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_email_and_role()
            .times(1)
            .returning(move |_, _| {
                let mut account = affiliate(5, "Asha Rao", "asha0005123");
                account.password_hash = digest.clone();
                Ok(Some(account))
            });

        let svc = AffiliateService::new(
            Arc::new(mock_accounts),
            Arc::new(MockClickRepository::new()),
            Arc::new(MockPayoutRepository::new()),
            real_credentials,
            "http://localhost:3000".to_string(),
        );

        let account = svc
            .login("asha@example.com", "correct-password")
            .await
            .unwrap();

        assert_eq!(account.id, 5);
    }

    #[tokio::test]
    async fn test_dashboard_aggregates_counts_and_link() {
        let mut mock_clicks = MockClickRepository::new();
        mock_clicks
            .expect_count_for_affiliate()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(42));
        mock_clicks
            .expect_count_for_affiliate_since()
            .withf(|id, since| *id == 5 && *since <= Utc::now())
            .times(1)
            .returning(|_, _| Ok(3));

        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_list_for_affiliate()
            .times(1)
            .returning(|_| {
                Ok(vec![Payout::new(
                    1,
                    5,
                    Decimal::new(2500, 2),
                    PayoutStatus::Pending,
                    Utc::now(),
                    None,
                )])
            });

        let svc = service(MockAccountRepository::new(), mock_clicks, mock_payouts);

        let account = affiliate(5, "Asha Rao", "asha0005123");
        let data = svc.dashboard(&account).await.unwrap();

        assert_eq!(data.referral_link, "http://localhost:3000/r/asha0005123");
        assert_eq!(data.total_clicks, 42);
        assert_eq!(data.today_clicks, 3);
        assert_eq!(data.payouts.len(), 1);
    }

    #[tokio::test]
    async fn test_new_affiliate_dashboard_is_empty() {
        let mut mock_clicks = MockClickRepository::new();
        mock_clicks
            .expect_count_for_affiliate()
            .times(1)
            .returning(|_| Ok(0));
        mock_clicks
            .expect_count_for_affiliate_since()
            .times(1)
            .returning(|_, _| Ok(0));

        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_list_for_affiliate()
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(MockAccountRepository::new(), mock_clicks, mock_payouts);

        let data = svc
            .dashboard(&affiliate(5, "Asha Rao", "asha0005123"))
            .await
            .unwrap();

        assert_eq!(data.total_clicks, 0);
        assert_eq!(data.today_clicks, 0);
        assert!(data.payouts.is_empty());
    }

    #[tokio::test]
    async fn test_request_payout_ignores_bad_amounts() {
        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts.expect_create().times(0);

        let svc = service(
            MockAccountRepository::new(),
            MockClickRepository::new(),
            mock_payouts,
        );

        assert!(svc.request_payout(5, None).await.unwrap().is_none());
        assert!(svc.request_payout(5, Some("")).await.unwrap().is_none());
        assert!(
            svc.request_payout(5, Some("abc"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(svc.request_payout(5, Some("-5")).await.unwrap().is_none());
        assert!(svc.request_payout(5, Some("0")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_request_payout_creates_pending_record() {
        let mut mock_payouts = MockPayoutRepository::new();
        mock_payouts
            .expect_create()
            .withf(|new_payout| {
                new_payout.account_id == 5 && new_payout.amount == Decimal::new(2550, 2)
            })
            .times(1)
            .returning(|new_payout| {
                Ok(Payout::new(
                    1,
                    new_payout.account_id,
                    new_payout.amount,
                    PayoutStatus::Pending,
                    Utc::now(),
                    None,
                ))
            });

        let svc = service(
            MockAccountRepository::new(),
            MockClickRepository::new(),
            mock_payouts,
        );

        let payout = svc.request_payout(5, Some("25.50")).await.unwrap().unwrap();

        assert!(payout.is_pending());
        assert!(payout.processed_at.is_none());
    }
}
