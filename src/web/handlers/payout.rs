//! Payout request form handler.

use axum::extract::{Form, State};
use axum::response::Redirect;
use axum::Extension;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::CurrentAffiliate;

/// Payout form fields. The amount arrives as raw text; parsing and the
/// positivity check happen in the service.
#[derive(Debug, Deserialize)]
pub struct PayoutForm {
    pub amount: Option<String>,
}

/// Handles payout submission.
///
/// # Endpoint
///
/// `POST /payout-request` (affiliate session required)
///
/// Always redirects back to the dashboard: an invalid amount is dropped
/// without creating a record and without surfacing an error.
pub async fn request_payout_handler(
    State(st): State<AppState>,
    Extension(CurrentAffiliate(account)): Extension<CurrentAffiliate>,
    Form(form): Form<PayoutForm>,
) -> Result<Redirect, AppError> {
    st.affiliates
        .request_payout(account.id, form.amount.as_deref())
        .await?;

    Ok(Redirect::to("/dashboard"))
}
