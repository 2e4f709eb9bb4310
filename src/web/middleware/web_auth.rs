//! Cookie-based authentication middleware for the web dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::api::middleware::auth::{CurrentUser, session_token_from_cookies};
use crate::state::AppState;

/// Where unauthenticated browsers are sent.
pub const LOGIN_PATH: &str = "/dashboard/login";

/// Authenticates dashboard requests by the `session_token` cookie.
///
/// On success the resolved [`CurrentUser`] is added to the request
/// extensions. Unlike the API layer, which answers `401`, failures redirect
/// to the login page.
///
/// # Errors
///
/// Returns `Redirect` to `/dashboard/login` if the cookie is missing or the
/// token does not resolve to an active session.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = session_token_from_cookies(req.headers()) else {
        return Err(Redirect::to(LOGIN_PATH));
    };

    match st.auth_service.authenticate(&token).await {
        Ok(id) => {
            req.extensions_mut().insert(CurrentUser { id });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Dashboard session rejected");
            Err(Redirect::to(LOGIN_PATH))
        }
    }
}
