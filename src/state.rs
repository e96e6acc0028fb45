//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{
    AdminService, AffiliateService, CredentialService, ReferralService, SessionService,
};

/// Application state shared across the router.
///
/// Holds the service layer; handlers never touch repositories directly.
#[derive(Clone)]
pub struct AppState {
    pub affiliates: Arc<AffiliateService>,
    pub admin: Arc<AdminService>,
    pub referrals: Arc<ReferralService>,
    pub sessions: Arc<SessionService>,
    pub credentials: Arc<CredentialService>,
}

impl AppState {
    /// Creates the application state from its services.
    pub fn new(
        affiliates: Arc<AffiliateService>,
        admin: Arc<AdminService>,
        referrals: Arc<ReferralService>,
        sessions: Arc<SessionService>,
        credentials: Arc<CredentialService>,
    ) -> Self {
        Self {
            affiliates,
            admin,
            referrals,
            sessions,
            credentials,
        }
    }
}
