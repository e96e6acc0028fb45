//! PostgreSQL implementation of the payout repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    NewPayout, Payout, PayoutStatus, PayoutWithAffiliate,
};
use crate::domain::repositories::PayoutRepository;
use crate::error::AppError;

const PAYOUT_COLUMNS: &str = "id, account_id, amount, status, created_at, processed_at";

/// PostgreSQL repository for payout request storage and adjudication.
pub struct PgPayoutRepository {
    pool: Arc<PgPool>,
}

impl PgPayoutRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PayoutRow {
    id: i64,
    account_id: i64,
    amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl PayoutRow {
    fn into_payout(self) -> Result<Payout, AppError> {
        let status = PayoutStatus::parse(&self.status).ok_or_else(|| {
            tracing::error!(status = %self.status, payout_id = self.id, "unknown status value");
            AppError::internal("Unknown payout status")
        })?;

        Ok(Payout::new(
            self.id,
            self.account_id,
            self.amount,
            status,
            self.created_at,
            self.processed_at,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct PayoutJoinRow {
    id: i64,
    account_id: i64,
    amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    affiliate_name: String,
    affiliate_email: String,
}

impl PayoutJoinRow {
    fn into_joined(self) -> Result<PayoutWithAffiliate, AppError> {
        let payout = PayoutRow {
            id: self.id,
            account_id: self.account_id,
            amount: self.amount,
            status: self.status,
            created_at: self.created_at,
            processed_at: self.processed_at,
        }
        .into_payout()?;

        Ok(PayoutWithAffiliate {
            payout,
            affiliate_name: self.affiliate_name,
            affiliate_email: self.affiliate_email,
        })
    }
}

#[async_trait]
impl PayoutRepository for PgPayoutRepository {
    async fn create(&self, new_payout: NewPayout) -> Result<Payout, AppError> {
        let row = sqlx::query_as::<_, PayoutRow>(&format!(
            "INSERT INTO payout_requests (account_id, amount) \
             VALUES ($1, $2) \
             RETURNING {PAYOUT_COLUMNS}"
        ))
        .bind(new_payout.account_id)
        .bind(new_payout.amount)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.into_payout()
    }

    async fn list_for_affiliate(&self, account_id: i64) -> Result<Vec<Payout>, AppError> {
        let rows = sqlx::query_as::<_, PayoutRow>(&format!(
            "SELECT {PAYOUT_COLUMNS} FROM payout_requests \
             WHERE account_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(account_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(PayoutRow::into_payout).collect()
    }

    async fn list_with_affiliate(&self) -> Result<Vec<PayoutWithAffiliate>, AppError> {
        let rows = sqlx::query_as::<_, PayoutJoinRow>(
            "SELECT p.id, p.account_id, p.amount, p.status, p.created_at, p.processed_at, \
                    a.name AS affiliate_name, a.email AS affiliate_email \
             FROM payout_requests p \
             JOIN accounts a ON a.id = p.account_id \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(PayoutJoinRow::into_joined).collect()
    }

    async fn count_pending(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM payout_requests WHERE status = 'pending'",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn set_status(
        &self,
        id: i64,
        status: PayoutStatus,
    ) -> Result<Option<Payout>, AppError> {
        let row = sqlx::query_as::<_, PayoutRow>(&format!(
            "UPDATE payout_requests SET status = $2, processed_at = now() \
             WHERE id = $1 \
             RETURNING {PAYOUT_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(PayoutRow::into_payout).transpose()
    }
}
