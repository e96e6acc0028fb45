//! Application services orchestrating the business logic.
//!
//! Services hold repository trait objects and contain all use-case
//! logic; they are unit-tested against mockall-generated repositories.
//!
//! # Available Services
//!
//! - [`CredentialService`] - Password hashing and admin bootstrap
//! - [`SessionService`] - Browser sessions and identity slots
//! - [`ReferralService`] - Referral resolution and click recording
//! - [`AffiliateService`] - Registration, login, dashboard, payouts
//! - [`AdminService`] - Admin login, stats, listings, adjudication

pub mod admin_service;
pub mod affiliate_service;
pub mod credential_service;
pub mod referral_service;
pub mod session_service;

pub use admin_service::{AdminService, Overview, PayoutDecision};
pub use affiliate_service::{AffiliateService, DashboardData};
pub use credential_service::CredentialService;
pub use referral_service::ReferralService;
pub use session_service::{SessionIdentities, SessionService};
