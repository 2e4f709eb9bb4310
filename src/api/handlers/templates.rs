//! Handlers for template endpoints (list, create, delete).
//!
//! Every failure other than authentication (401) and validation (400) is
//! logged and reported as a generic 500 naming the operation.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::template::{
    CreateTemplateRequest, DeleteTemplateParams, SuccessResponse, TemplateItem,
    TemplateListResponse, TemplateResponse,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the authenticated user's templates, newest first.
///
/// # Endpoint
///
/// `GET /api/templates`
///
/// # Response
///
/// ```json
/// { "success": true, "templates": [ { "id": 2, "name": "...", "createdAt": "..." } ] }
/// ```
///
/// # Errors
///
/// - 401 if the request has no valid session
/// - 500 `Failed to fetch templates` on storage errors
pub async fn list_templates_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<TemplateListResponse>, AppError> {
    let templates = state
        .template_service
        .list_templates(&user.id)
        .await
        .map_err(|e| e.or_generic("list_templates", "Failed to fetch templates"))?;

    Ok(Json(TemplateListResponse {
        success: true,
        templates: templates.into_iter().map(TemplateItem::from).collect(),
    }))
}

/// Creates a template owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/templates`
///
/// # Request Body
///
/// ```json
/// { "name": "X", "role": "Backend", "experienceLevel": "Senior", "description": "optional" }
/// ```
///
/// # Errors
///
/// - 400 `Name, role, and experience level are required` if any is missing or empty
/// - 400 if a field is too long
/// - 401 if the request has no valid session
/// - 500 `Failed to create template` if the body is not valid JSON or on storage errors
pub async fn create_template_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> Result<Json<TemplateResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::internal(format!("Unreadable template body: {e}"))
            .or_generic("create_template", "Failed to create template")
    })?;
    payload.validate()?;

    let template = state
        .template_service
        .create_template(&user.id, payload.into())
        .await
        .map_err(|e| e.or_generic("create_template", "Failed to create template"))?;

    Ok(Json(TemplateResponse {
        success: true,
        template: template.into(),
    }))
}

/// Deletes one of the authenticated user's templates.
///
/// # Endpoint
///
/// `DELETE /api/templates?id=<id>`
///
/// # Ownership
///
/// The delete is scoped to both `id` and the caller. A template owned by
/// someone else is indistinguishable from one that does not exist.
///
/// # Errors
///
/// - 400 `Template ID is required` if `id` is missing or empty
/// - 401 if the request has no valid session
/// - 500 `Failed to delete template` if nothing was deleted or on storage errors
pub async fn delete_template_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<DeleteTemplateParams>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .template_service
        .delete_template(&user.id, params.id.as_deref())
        .await
        .map_err(|e| e.or_generic("delete_template", "Failed to delete template"))?;

    Ok(Json(SuccessResponse { success: true }))
}
