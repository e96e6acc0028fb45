//! Browser session entity with two independent identity slots.

use chrono::{DateTime, Utc};

/// A persisted browser session.
///
/// A session may carry an affiliate identity, an admin identity, both, or
/// neither. The slots are independent: logging in or out of one side
/// never touches the other. Only the HMAC of the cookie token is stored.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: i64,
    pub token_hash: String,
    pub affiliate_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates a new SessionRecord instance.
    pub fn new(
        id: i64,
        token_hash: String,
        affiliate_id: Option<i64>,
        admin_id: Option<i64>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            token_hash,
            affiliate_id,
            admin_id,
            created_at,
            updated_at,
        }
    }
}

/// Input data for persisting a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub affiliate_id: Option<i64>,
    pub admin_id: Option<i64>,
}
