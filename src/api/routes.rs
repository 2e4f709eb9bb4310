//! API route configuration.
//!
//! All API endpoints require a session via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_template_handler, delete_template_handler, get_profile_handler,
    list_templates_handler, update_profile_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, without the authentication layer applied.
///
/// # Endpoints
///
/// - `GET    /templates`              - List the caller's templates, newest first
/// - `POST   /templates`              - Create a template
/// - `DELETE /templates?id=<id>`      - Delete one of the caller's templates
/// - `GET    /profile`                - Profile, statistics and interview history
/// - `GET    /profile?type=progress`  - Monthly score series
/// - `PUT    /profile`                - Replace the editable profile fields
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/templates",
            get(list_templates_handler)
                .post(create_template_handler)
                .delete(delete_template_handler),
        )
        .route(
            "/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
}
