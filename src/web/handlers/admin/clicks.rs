//! Admin click log page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::domain::entities::ClickWithAffiliate;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the click log.
#[derive(Template, WebTemplate)]
#[template(path = "admin/clicks.html")]
struct ClicksTemplate {
    clicks: Vec<ClickWithAffiliate>,
}

/// Lists the most recent clicks with their affiliate, capped at 100.
///
/// # Endpoint
///
/// `GET /admin/clicks` (admin session required)
pub async fn list_handler(State(st): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let clicks = st.admin.list_clicks().await?;

    Ok(ClicksTemplate { clicks })
}
