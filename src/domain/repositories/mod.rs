//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract
//! data access operations following the Repository pattern. These traits
//! are implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Affiliate and admin accounts
//! - [`ClickRepository`] - Referral click recording and counting
//! - [`PayoutRepository`] - Payout requests and adjudication
//! - [`SessionRepository`] - Browser sessions with two identity slots

pub mod account_repository;
pub mod click_repository;
pub mod payout_repository;
pub mod session_repository;

pub use account_repository::AccountRepository;
pub use click_repository::ClickRepository;
pub use payout_repository::PayoutRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use payout_repository::MockPayoutRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
