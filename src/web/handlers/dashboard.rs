//! Affiliate dashboard page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Extension;

use crate::domain::entities::Payout;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::CurrentAffiliate;

/// Template for the affiliate dashboard.
///
/// Renders `templates/dashboard.html` with:
/// - The shareable referral link
/// - All-time and today's click counters
/// - Payout request form and history, newest first
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    name: String,
    referral_link: String,
    total_clicks: i64,
    today_clicks: i64,
    payouts: Vec<Payout>,
}

/// Renders the affiliate dashboard.
///
/// # Endpoint
///
/// `GET /dashboard` (affiliate session required)
pub async fn dashboard_handler(
    State(st): State<AppState>,
    Extension(CurrentAffiliate(account)): Extension<CurrentAffiliate>,
) -> Result<impl IntoResponse, AppError> {
    let data = st.affiliates.dashboard(&account).await?;

    Ok(DashboardTemplate {
        name: account.name,
        referral_link: data.referral_link,
        total_clicks: data.total_clicks,
        today_clicks: data.today_clicks,
        payouts: data.payouts,
    })
}
