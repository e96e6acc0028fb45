//! Admin affiliate listing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::domain::entities::Account;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the affiliate listing.
#[derive(Template, WebTemplate)]
#[template(path = "admin/affiliates.html")]
struct AffiliatesTemplate {
    affiliates: Vec<Account>,
}

/// Lists all affiliates, newest first.
///
/// # Endpoint
///
/// `GET /admin/affiliates` (admin session required)
pub async fn list_handler(State(st): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let affiliates = st.admin.list_affiliates().await?;

    Ok(AffiliatesTemplate { affiliates })
}
