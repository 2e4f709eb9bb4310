//! DTOs for template endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreateTemplate;
use crate::domain::entities::Template;

/// Request body for `POST /api/templates`.
///
/// Presence of `name`, `role` and `experienceLevel` is checked by the
/// service so that a missing field yields the documented message.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub role: Option<String>,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub experience_level: Option<String>,

    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: Option<String>,
}

impl From<CreateTemplateRequest> for CreateTemplate {
    fn from(req: CreateTemplateRequest) -> Self {
        CreateTemplate {
            name: req.name,
            role: req.role,
            experience_level: req.experience_level,
            description: req.description,
        }
    }
}

/// Query string of `DELETE /api/templates`.
#[derive(Debug, Deserialize)]
pub struct DeleteTemplateParams {
    pub id: Option<String>,
}

/// A template as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub experience_level: String,
    pub description: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Template> for TemplateItem {
    fn from(t: Template) -> Self {
        TemplateItem {
            id: t.id,
            name: t.name,
            role: t.role,
            experience_level: t.experience_level,
            description: t.description,
            user_id: t.user_id,
            created_at: t.created_at,
        }
    }
}

/// Response of `GET /api/templates`.
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub success: bool,
    pub templates: Vec<TemplateItem>,
}

/// Response of `POST /api/templates`.
#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub success: bool,
    pub template: TemplateItem,
}

/// Response carrying only the success flag.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
