//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewSession, SessionRecord};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

const SESSION_COLUMNS: &str =
    "id, token_hash, affiliate_id, admin_id, created_at, updated_at";

/// PostgreSQL repository for browser session storage.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    token_hash: String,
    affiliate_id: Option<i64>,
    admin_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord::new(
            row.id,
            row.token_hash,
            row.affiliate_id,
            row.admin_id,
            row.created_at,
            row.updated_at,
        )
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<SessionRecord, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "INSERT INTO sessions (token_hash, affiliate_id, admin_id) \
             VALUES ($1, $2, $3) \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(&new_session.token_hash)
        .bind(new_session.affiliate_id)
        .bind(new_session.admin_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE token_hash = $1"
        ))
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn set_affiliate(
        &self,
        session_id: i64,
        affiliate_id: Option<i64>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE sessions SET affiliate_id = $2, updated_at = now() WHERE id = $1",
        )
        .bind(session_id)
        .bind(affiliate_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_admin(&self, session_id: i64, admin_id: Option<i64>) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET admin_id = $2, updated_at = now() WHERE id = $1")
            .bind(session_id)
            .bind(admin_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
