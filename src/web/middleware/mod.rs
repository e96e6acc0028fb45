//! Web middleware: session guards, rate limiting, request tracing.

pub mod admin_auth;
pub mod affiliate_auth;
pub mod rate_limit;
pub mod trace;

pub use admin_auth::CurrentAdmin;
pub use affiliate_auth::CurrentAffiliate;
