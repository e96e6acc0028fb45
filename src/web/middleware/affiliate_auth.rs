//! Cookie-based guard for affiliate-only routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::domain::entities::Account;
use crate::state::AppState;
use crate::web::cookies;

/// The affiliate identity attached to a request that passed the guard.
#[derive(Debug, Clone)]
pub struct CurrentAffiliate(pub Account);

/// Guards affiliate-only routes.
///
/// Resolves the session cookie and requires the affiliate slot to be
/// set; the admin slot is not consulted. On success the resolved account
/// is inserted as a request extension; otherwise the browser is
/// redirected to `/login`.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = cookies::session_token(req.headers()) else {
        return Err(Redirect::to("/login"));
    };

    match st.sessions.resolve(&token).await {
        Ok(identities) => match identities.affiliate {
            Some(account) => {
                req.extensions_mut().insert(CurrentAffiliate(account));
                Ok(next.run(req).await)
            }
            None => Err(Redirect::to("/login")),
        },
        Err(_) => Err(Redirect::to("/login")),
    }
}
