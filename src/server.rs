//! HTTP server initialization and runtime setup.
//!
//! Handles database connection, migrations, service wiring, admin
//! bootstrap, and the Axum server lifecycle.

use crate::application::services::{
    AdminService, AffiliateService, CredentialService, ReferralService, SessionService,
};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgAccountRepository, PgClickRepository, PgPayoutRepository, PgSessionRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Service layer wiring
/// - Admin bootstrap (when configured)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let accounts = Arc::new(PgAccountRepository::new(pool.clone()));
    let clicks = Arc::new(PgClickRepository::new(pool.clone()));
    let payouts = Arc::new(PgPayoutRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));

    let credentials = Arc::new(CredentialService::new(accounts.clone()));

    match config.admin_bootstrap() {
        Some((email, password)) => credentials.bootstrap_admin(email, password).await?,
        None => {
            tracing::warn!(
                "ADMIN_EMAIL / ADMIN_PASSWORD not configured, admin bootstrap skipped"
            );
        }
    }

    let state = AppState::new(
        Arc::new(AffiliateService::new(
            accounts.clone(),
            clicks.clone(),
            payouts.clone(),
            credentials.clone(),
            config.base_url.clone(),
        )),
        Arc::new(AdminService::new(
            accounts.clone(),
            clicks.clone(),
            payouts.clone(),
            credentials.clone(),
        )),
        Arc::new(ReferralService::new(accounts.clone(), clicks.clone())),
        Arc::new(SessionService::new(
            sessions,
            accounts,
            config.session_secret.clone(),
        )),
        credentials,
    );

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
