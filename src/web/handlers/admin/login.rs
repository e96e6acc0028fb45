//! Admin login, logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies;

/// Template for the admin login page.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
struct AdminLoginTemplate {
    error: Option<String>,
    email: String,
}

/// Renders the admin login form.
///
/// # Endpoint
///
/// `GET /admin/login`
pub async fn login_page() -> impl IntoResponse {
    AdminLoginTemplate {
        error: None,
        email: String::new(),
    }
}

/// Admin login form fields.
#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
}

/// Handles admin login submission.
///
/// # Endpoint
///
/// `POST /admin/login`
///
/// Unlike the affiliate form, unknown email and wrong password render
/// distinct messages.
pub async fn login_submit(
    State(st): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AdminLoginForm>,
) -> Result<Response, AppError> {
    match st.admin.login(&form.email, &form.password).await {
        Ok(account) => {
            let existing = cookies::session_token(&headers);
            let token = st
                .sessions
                .establish_admin(existing.as_deref(), account.id)
                .await?;

            Ok((
                AppendHeaders([(SET_COOKIE, cookies::session_cookie(&token))]),
                Redirect::to("/admin"),
            )
                .into_response())
        }
        Err(AppError::Unauthorized { message }) => Ok(AdminLoginTemplate {
            error: Some(message),
            email: form.email,
        }
        .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "admin login failed");
            Ok(AdminLoginTemplate {
                error: Some("Something went wrong, please try again".to_string()),
                email: form.email,
            }
            .into_response())
        }
    }
}

/// Clears the admin identity from the session.
///
/// # Endpoint
///
/// `GET /admin/logout`
///
/// Only the admin slot is cleared; an affiliate identity held by the
/// same browser session survives.
pub async fn logout_handler(
    State(st): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    if let Some(token) = cookies::session_token(&headers) {
        st.sessions.clear_admin(&token).await?;
    }

    Ok(Redirect::to("/admin/login"))
}
