//! PostgreSQL implementation of the account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount, Role};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password_hash, referral_code, role, created_at, updated_at";

/// PostgreSQL repository for account storage and retrieval.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    referral_code: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, AppError> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            tracing::error!(role = %self.role, account_id = self.id, "unknown role value");
            AppError::internal("Unknown account role")
        })?;

        Ok(Account::new(
            self.id,
            self.name,
            self.email,
            self.password_hash,
            self.referral_code,
            role,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO accounts (name, email, password_hash, referral_code, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&new_account.name)
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .bind(&new_account.referral_code)
        .bind(new_account.role.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        row.into_account()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_email_and_role(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1 AND role = $2"
        ))
        .bind(email)
        .bind(role.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_affiliate_by_code(&self, code: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE referral_code = $1 AND role = 'affiliate'"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn update_referral_code(&self, id: i64, code: &str) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE accounts SET referral_code = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(AccountRow::into_account)
            .transpose()?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn list_affiliates(&self) -> Result<Vec<Account>, AppError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE role = 'affiliate' \
             ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn count_affiliates(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM accounts WHERE role = 'affiliate'",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
