//! Routes mounted under `/dashboard`.

use crate::state::AppState;
use crate::web::handlers::{login_handler, profile_page_handler, update_profile_page_handler};
use axum::{Router, response::Redirect, routing::get};

/// Pages behind [`crate::web::middleware::web_auth`].
///
/// `/` forwards to the profile page, which takes
/// `?tab=statistics|history|settings` and `?edit=1`. The edit form posts
/// back to the same path.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard/profile") }))
        .route(
            "/profile",
            get(profile_page_handler).post(update_profile_page_handler),
        )
}

/// The login page, reachable without a session.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_handler))
}
