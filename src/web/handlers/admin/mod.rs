//! Admin-facing page handlers.

pub mod affiliates;
pub mod clicks;
pub mod login;
pub mod overview;
pub mod payouts;
