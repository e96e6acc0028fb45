//! Referral link landing handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::header;
use axum::response::IntoResponse;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;

/// Template for the referral landing page shown after a recorded click.
#[derive(Template, WebTemplate)]
#[template(path = "referral.html")]
struct ReferralTemplate {
    affiliate_name: String,
}

/// Resolves a referral link and records the click.
///
/// # Endpoint
///
/// `GET /r/{code}` (public)
///
/// An unknown code answers `404` with plain text and records nothing.
/// Client IP and user agent are captured best-effort; the click is
/// recorded even when both are absent.
pub async fn referral_handler(
    State(st): State<AppState>,
    Path(code): Path<String>,
    req: Request,
) -> Result<impl IntoResponse, AppError> {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let account = st
        .referrals
        .resolve_and_record_click(&code, ip, user_agent)
        .await?;

    Ok(ReferralTemplate {
        affiliate_name: account.name,
    })
}
