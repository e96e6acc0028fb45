//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, ClickWithAffiliate, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click event storage and counting.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    account_id: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click::new(row.id, row.account_id, row.ip, row.user_agent, row.created_at)
    }
}

#[derive(sqlx::FromRow)]
struct ClickJoinRow {
    id: i64,
    account_id: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    affiliate_name: String,
    affiliate_email: String,
}

impl From<ClickJoinRow> for ClickWithAffiliate {
    fn from(row: ClickJoinRow) -> Self {
        ClickWithAffiliate {
            click: Click::new(row.id, row.account_id, row.ip, row.user_agent, row.created_at),
            affiliate_name: row.affiliate_name,
            affiliate_email: row.affiliate_email,
        }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            "INSERT INTO clicks (account_id, ip, user_agent) \
             VALUES ($1, $2, $3) \
             RETURNING id, account_id, ip, user_agent, created_at",
        )
        .bind(new_click.account_id)
        .bind(&new_click.ip)
        .bind(&new_click.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_for_affiliate(&self, account_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn count_for_affiliate_since(
        &self,
        account_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clicks WHERE account_id = $1 AND created_at >= $2",
        )
        .bind(account_id)
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_recent_with_affiliate(
        &self,
        limit: i64,
    ) -> Result<Vec<ClickWithAffiliate>, AppError> {
        let rows = sqlx::query_as::<_, ClickJoinRow>(
            "SELECT c.id, c.account_id, c.ip, c.user_agent, c.created_at, \
                    a.name AS affiliate_name, a.email AS affiliate_email \
             FROM clicks c \
             JOIN accounts a ON a.id = c.account_id \
             ORDER BY c.created_at DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
