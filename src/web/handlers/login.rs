//! Affiliate login, logout.

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

/// Template for the affiliate login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
    email: String,
}

/// Renders the login form.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        error: None,
        email: String::new(),
    }
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Handles login submission.
///
/// # Endpoint
///
/// `POST /login`
///
/// A failed login re-renders the form with one generic message for both
/// unknown email and wrong password.
pub async fn login_submit(
    State(st): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match st.affiliates.login(&form.email, &form.password).await {
        Ok(account) => {
            let existing = cookies::session_token(&headers);
            let token = st
                .sessions
                .establish_affiliate(existing.as_deref(), account.id)
                .await?;

            Ok((
                AppendHeaders([(SET_COOKIE, cookies::session_cookie(&token))]),
                Redirect::to("/dashboard"),
            )
                .into_response())
        }
        Err(AppError::Unauthorized { message }) => Ok(LoginTemplate {
            error: Some(message),
            email: form.email,
        }
        .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "affiliate login failed");
            Ok(LoginTemplate {
                error: Some("Something went wrong, please try again".to_string()),
                email: form.email,
            }
            .into_response())
        }
    }
}

/// Clears the affiliate identity from the session.
///
/// # Endpoint
///
/// `GET /logout`
///
/// Only the affiliate slot is cleared; an admin identity held by the
/// same browser session survives.
pub async fn logout_handler(
    State(st): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    if let Some(token) = cookies::session_token(&headers) {
        st.sessions.clear_affiliate(&token).await?;
    }

    Ok(Redirect::to("/login"))
}
