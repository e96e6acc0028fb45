//! Session cookie parsing and construction.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Extracts the session token from a request's `Cookie` header.
///
/// Handles multiple cookies by splitting on semicolons and picking the
/// `sid` key-value pair; other cookies are ignored.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}

/// Builds the `Set-Cookie` value carrying a session token.
///
/// HttpOnly keeps the token out of reach of page scripts; the cookie is
/// session-scoped (no Max-Age) and spans the whole site so both the
/// affiliate and admin areas share one session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}
