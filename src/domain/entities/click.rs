//! Click entity representing a single referral link visit.

use chrono::{DateTime, Utc};

/// A click recorded when a visitor follows an affiliate's referral link.
///
/// Client metadata is best-effort; either field may be absent when the
/// request did not carry it.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub account_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        id: i64,
        account_id: i64,
        ip: Option<String>,
        user_agent: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            ip,
            user_agent,
            created_at,
        }
    }
}

/// Input data for recording a new click event.
///
/// The `account_id` must reference an affiliate account; the timestamp is
/// set by the database.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub account_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// A click joined with its affiliate, for the admin click log.
#[derive(Debug, Clone)]
pub struct ClickWithAffiliate {
    pub click: Click,
    pub affiliate_name: String,
    pub affiliate_email: String,
}
