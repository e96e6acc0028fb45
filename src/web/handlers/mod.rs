//! Web page handlers.
//!
//! Each handler renders an askama template or redirects; form-level
//! failures re-render their form with an inline message.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod payout;
pub mod referral;
pub mod register;
