//! Payout request entity and its status lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Adjudication state of a payout request.
///
/// `Pending` is the only initial state. `Approved` and `Rejected` are
/// terminal from the affiliate's point of view; see
/// [`crate::application::services::AdminService::adjudicate_payout`] for
/// the re-adjudication policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutStatus {
    Pending,
    Approved,
    Rejected,
}

impl PayoutStatus {
    /// Storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Approved => "approved",
            PayoutStatus::Rejected => "rejected",
        }
    }

    /// Parses a storage value back into a status.
    pub fn parse(value: &str) -> Option<PayoutStatus> {
        match value {
            "pending" => Some(PayoutStatus::Pending),
            "approved" => Some(PayoutStatus::Approved),
            "rejected" => Some(PayoutStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An affiliate's request to be paid out a given amount.
///
/// `processed_at` is unset while the request is pending and is written
/// when an administrator adjudicates it.
#[derive(Debug, Clone)]
pub struct Payout {
    pub id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Payout {
    /// Creates a new Payout instance.
    pub fn new(
        id: i64,
        account_id: i64,
        amount: Decimal,
        status: PayoutStatus,
        created_at: DateTime<Utc>,
        processed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            account_id,
            amount,
            status,
            created_at,
            processed_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PayoutStatus::Pending
    }
}

/// Input data for creating a new payout request.
///
/// The amount must already be validated as positive; the status starts
/// as `pending` in the database.
#[derive(Debug, Clone)]
pub struct NewPayout {
    pub account_id: i64,
    pub amount: Decimal,
}

/// A payout joined with its affiliate, for the admin payout queue.
#[derive(Debug, Clone)]
pub struct PayoutWithAffiliate {
    pub payout: Payout,
    pub affiliate_name: String,
    pub affiliate_email: String,
}
