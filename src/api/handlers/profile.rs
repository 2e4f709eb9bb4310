//! Handlers for the profile endpoints consumed by the dashboard.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::profile::{
    ProfileData, ProfileQuery, ProfileResponse, ProfileUpdateResponse, ProgressPointDto,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the profile overview or the progress series.
///
/// # Endpoints
///
/// - `GET /api/profile` → `{ user, statistics, interviewHistory }`
/// - `GET /api/profile?type=progress` → `[ { month, score } ]`
///
/// # Errors
///
/// - 401 if the request has no valid session
/// - 404 if the session's user has no profile
/// - 500 on storage errors
pub async fn get_profile_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    if query.wants_progress() {
        let progress = state
            .profile_service
            .get_progress(&user.id)
            .await
            .map_err(|e| e.hide_internal("get_progress", "Failed to fetch progress"))?;

        let points: Vec<ProgressPointDto> = progress.into_iter().map(Into::into).collect();
        return Ok(Json(points).into_response());
    }

    let overview = state
        .profile_service
        .get_overview(&user.id)
        .await
        .map_err(|e| e.hide_internal("get_profile", "Failed to fetch profile"))?;

    Ok(Json(ProfileResponse::from(overview)).into_response())
}

/// Replaces the editable profile fields of the authenticated user.
///
/// # Endpoint
///
/// `PUT /api/profile`
///
/// # Request Body
///
/// ```json
/// { "name": "Ada", "location": "London", "bio": "...", "skills": ["Rust"] }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed or a field fails validation
/// - 401 if the request has no valid session
/// - 404 if the session's user has no profile
/// - 500 on storage errors
pub async fn update_profile_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<ProfileData>, JsonRejection>,
) -> Result<Json<ProfileUpdateResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected profile body");
        AppError::bad_request("Invalid request body")
    })?;
    payload.validate()?;

    let updated = state
        .profile_service
        .update_profile(&user.id, payload.into())
        .await
        .map_err(|e| e.hide_internal("update_profile", "Failed to update profile"))?;

    Ok(Json(ProfileUpdateResponse {
        success: true,
        user: updated.into(),
    }))
}
