//! Admin overview page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::state::AppState;

/// Template for the admin overview page.
#[derive(Template, WebTemplate)]
#[template(path = "admin/overview.html")]
struct OverviewTemplate {
    affiliate_count: i64,
    click_count: i64,
    pending_payout_count: i64,
}

/// Renders the admin overview with aggregate counters.
///
/// # Endpoint
///
/// `GET /admin` (admin session required)
pub async fn overview_handler(
    State(st): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let overview = st.admin.overview().await?;

    Ok(OverviewTemplate {
        affiliate_count: overview.affiliate_count,
        click_count: overview.click_count,
        pending_payout_count: overview.pending_payout_count,
    })
}
