//! Assembles the full HTTP surface.
//!
//! | Path           | Auth                          | Limiter         |
//! |----------------|-------------------------------|-----------------|
//! | `/health`      | none                          | none            |
//! | `/api/*`       | bearer token or cookie        | `secure_layer`  |
//! | `/dashboard/*` | cookie, `/login` excepted     | both            |
//! | `/static/*`    | none                          | none            |
//!
//! Every request is traced and trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the application.
///
/// The limiters key on the peer address, so serve this with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard/profile") }))
        .route("/health", get(health_handler))
        .nest("/api", api_router(&state))
        .nest("/dashboard", dashboard_router(&state))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn api_router(state: &AppState) -> Router<AppState> {
    api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer())
}

fn dashboard_router(state: &AppState) -> Router<AppState> {
    let pages = web::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        ))
        .layer(rate_limit::secure_layer());

    let login = web::routes::public_routes().layer(rate_limit::layer());

    pages.merge(login)
}
