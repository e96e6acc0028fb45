//! Admin payout queue and adjudication handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};

use crate::application::services::PayoutDecision;
use crate::domain::entities::PayoutWithAffiliate;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the payout queue.
#[derive(Template, WebTemplate)]
#[template(path = "admin/payouts.html")]
struct PayoutsTemplate {
    payouts: Vec<PayoutWithAffiliate>,
}

/// Lists all payout requests with their affiliate, newest first.
///
/// # Endpoint
///
/// `GET /admin/payouts` (admin session required)
pub async fn list_handler(State(st): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let payouts = st.admin.list_payouts().await?;

    Ok(PayoutsTemplate { payouts })
}

/// Approves a payout request.
///
/// # Endpoint
///
/// `POST /admin/payouts/{id}/approve` (admin session required)
pub async fn approve_handler(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    st.admin
        .adjudicate_payout(id, PayoutDecision::Approve)
        .await?;

    Ok(Redirect::to("/admin/payouts"))
}

/// Rejects a payout request.
///
/// # Endpoint
///
/// `POST /admin/payouts/{id}/reject` (admin session required)
pub async fn reject_handler(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    st.admin
        .adjudicate_payout(id, PayoutDecision::Reject)
        .await?;

    Ok(Redirect::to("/admin/payouts"))
}
