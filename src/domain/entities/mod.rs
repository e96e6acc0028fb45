//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures of the affiliate
//! portal. Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Account`] - An affiliate or administrator account
//! - [`Click`] - A recorded visit to a referral link
//! - [`Payout`] - An affiliate's payout request
//! - [`SessionRecord`] - A browser session with two identity slots
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for
//! creation: `NewAccount`, `NewClick`, `NewPayout`, `NewSession`.

pub mod account;
pub mod click;
pub mod payout;
pub mod session;

pub use account::{Account, NewAccount, Role, ADMIN_REFERRAL_CODE};
pub use click::{Click, ClickWithAffiliate, NewClick};
pub use payout::{NewPayout, Payout, PayoutStatus, PayoutWithAffiliate};
pub use session::{NewSession, SessionRecord};
