//! Affiliate signup page and form handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies;

/// Template for the affiliate signup page.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {
    error: Option<String>,
    name: String,
    email: String,
}

/// Renders the signup form.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        error: None,
        name: String::new(),
        email: String::new(),
    }
}

/// Signup form fields.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Handles signup submission.
///
/// # Endpoint
///
/// `POST /register`
///
/// On success the affiliate is logged in immediately and sent to the
/// dashboard. Validation and duplicate-email failures re-render the form
/// with an inline message and the entered name/email preserved.
pub async fn register_submit(
    State(st): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(RegisterTemplate {
            error: Some(first_message(&errors)),
            name: form.name,
            email: form.email,
        }
        .into_response());
    }

    match st
        .affiliates
        .register(&form.name, &form.email, &form.password)
        .await
    {
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
        Err(AppError::Validation { message }) | Err(AppError::Conflict { message }) => {
            Ok(RegisterTemplate {
                error: Some(message),
                name: form.name,
                email: form.email,
            }
            .into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            Ok(RegisterTemplate {
                error: Some("Something went wrong, please try again".to_string()),
                name: form.name,
                email: form.email,
            }
            .into_response())
        }
    }
}

/// Picks the first field message out of a validation result.
fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .filter_map(|e| e.message.as_ref())
        .next()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "Invalid input".to_string())
}
