//! Cookie-based guard for admin-only routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::domain::entities::Account;
use crate::state::AppState;
use crate::web::cookies;

/// The admin identity attached to a request that passed the guard.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Account);

/// Guards admin-only routes.
///
/// Mirror image of the affiliate guard: only the admin slot of the
/// session is consulted, and failures redirect to `/admin/login`.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = cookies::session_token(req.headers()) else {
        return Err(Redirect::to("/admin/login"));
    };

    match st.sessions.resolve(&token).await {
        Ok(identities) => match identities.admin {
            Some(account) => {
                req.extensions_mut().insert(CurrentAdmin(account));
                Ok(next.run(req).await)
            }
            None => Err(Redirect::to("/admin/login")),
        },
        Err(_) => Err(Redirect::to("/admin/login")),
    }
}
