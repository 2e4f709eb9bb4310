//! Liveness endpoint used by load balancers and the admin CLI.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::dto::health::{Checks, ComponentCheck, HealthResponse, ServiceStatus};
use crate::state::AppState;

/// `GET /health`
///
/// Answers 200 when PostgreSQL responds and 503 otherwise; the body has the
/// same shape either way:
///
/// ```json
/// { "status": "healthy", "version": "0.1.0",
///   "checks": { "database": { "status": "ok", "message": "Connected" } } }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.profile_service.health_check().await {
        Ok(()) => ComponentCheck::ok("Connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            ComponentCheck::error("Unreachable")
        }
    };

    let response = HealthResponse::from_checks(Checks { database });
    let code = match response.status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(response))
}
