//! Web route configuration.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::state::AppState;
use crate::web::handlers::{admin, dashboard, login, payout, referral, register};
use crate::web::middleware::{admin_auth, affiliate_auth};

/// Public routes without authentication.
///
/// # Endpoints
///
/// - `GET/POST /register` - Affiliate signup
/// - `GET/POST /login` - Affiliate login
/// - `GET /r/{code}` - Referral click recording
/// - `GET/POST /admin/login` - Admin login
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            get(register::register_page).post(register::register_submit),
        )
        .route("/login", get(login::login_page).post(login::login_submit))
        .route("/r/{code}", get(referral::referral_handler))
        .route(
            "/admin/login",
            get(admin::login::login_page).post(admin::login::login_submit),
        )
}

/// Affiliate routes guarded by the affiliate session slot.
///
/// # Endpoints
///
/// - `GET /dashboard` - Stats and payout history
/// - `POST /payout-request` - Submit a payout request
/// - `GET /logout` - Clear the affiliate slot
pub fn affiliate_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard_handler))
        .route("/payout-request", post(payout::request_payout_handler))
        .route("/logout", get(login::logout_handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            affiliate_auth::layer,
        ))
}

/// Admin routes guarded by the admin session slot.
///
/// # Endpoints
///
/// - `GET /admin` - Overview stats
/// - `GET /admin/affiliates` - Affiliate listing
/// - `GET /admin/clicks` - Recent click log (cap 100)
/// - `GET /admin/payouts` - Payout queue
/// - `POST /admin/payouts/{id}/approve`, `/reject` - Adjudication
/// - `GET /admin/logout` - Clear the admin slot
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::overview::overview_handler))
        .route("/admin/affiliates", get(admin::affiliates::list_handler))
        .route("/admin/clicks", get(admin::clicks::list_handler))
        .route("/admin/payouts", get(admin::payouts::list_handler))
        .route(
            "/admin/payouts/{id}/approve",
            post(admin::payouts::approve_handler),
        )
        .route(
            "/admin/payouts/{id}/reject",
            post(admin::payouts::reject_handler),
        )
        .route("/admin/logout", get(admin::login::logout_handler))
        .route_layer(middleware::from_fn_with_state(state, admin_auth::layer))
}
