//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/register`, `/login`, `/r/{code}`, `/admin/login` - public
//! - `/dashboard`, `/payout-request`, `/logout` - affiliate session
//! - `/admin/*` - admin session
//! - `/static/*` - static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Session guards** - Cookie-resolved identity slots per route group

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::web;
use crate::web::middleware::{rate_limit, trace};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let public = web::routes::public_routes().layer(rate_limit::layer());
    let affiliate =
        web::routes::affiliate_routes(state.clone()).layer(rate_limit::secure_layer());
    let admin = web::routes::admin_routes(state.clone()).layer(rate_limit::secure_layer());

    Router::new()
        .merge(public)
        .merge(affiliate)
        .merge(admin)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(trace::layer())
}
