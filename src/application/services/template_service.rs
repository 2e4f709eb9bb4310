//! Template management service.

use crate::domain::entities::{NewTemplate, Template};
use crate::domain::repositories::TemplateRepository;
use crate::error::AppError;
use std::sync::Arc;

/// Unvalidated input for creating a template, as received from a client.
#[derive(Debug, Clone, Default)]
pub struct CreateTemplate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub experience_level: Option<String>,
    pub description: Option<String>,
}

/// Service for per-user interview templates.
///
/// Every operation takes the authenticated user's id; ownership is enforced
/// by the repository queries, never by filtering in memory.
pub struct TemplateService<R: TemplateRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: TemplateRepository + ?Sized> TemplateService<R> {
    /// Creates a new template service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists the user's templates, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_templates(&self, user_id: &str) -> Result<Vec<Template>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    /// Creates a template owned by `user_id`.
    ///
    /// # Validation
    ///
    /// `name`, `role` and `experience_level` must be present and non-empty.
    /// Values are stored as given; whitespace-only strings count as present.
    /// A missing `description` is stored as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a required field is missing.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_template(
        &self,
        user_id: &str,
        input: CreateTemplate,
    ) -> Result<Template, AppError> {
        let (Some(name), Some(role), Some(experience_level)) = (
            non_empty(input.name),
            non_empty(input.role),
            non_empty(input.experience_level),
        ) else {
            return Err(AppError::bad_request(
                "Name, role, and experience level are required",
            ));
        };

        let new_template = NewTemplate {
            user_id: user_id.to_string(),
            name,
            role,
            experience_level,
            description: input.description.unwrap_or_default(),
        };

        let template = self.repository.create(new_template).await?;

        tracing::info!(user_id, template_id = template.id, "Template created");

        Ok(template)
    }

    /// Deletes the template identified by `id` if `user_id` owns it.
    ///
    /// `id` is the raw query parameter; a value that is not a template id
    /// can never match a row and is reported the same way as a miss.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `id` is missing or empty.
    /// Returns [`AppError::NotFound`] if no template matched both id and owner.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_template(&self, user_id: &str, id: Option<&str>) -> Result<(), AppError> {
        let raw_id = id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::bad_request("Template ID is required"))?;

        let Ok(id) = raw_id.parse::<i64>() else {
            return Err(AppError::not_found(format!("Template {raw_id} not found")));
        };

        if !self.repository.delete(id, user_id).await? {
            return Err(AppError::not_found(format!("Template {id} not found")));
        }

        tracing::info!(user_id, template_id = id, "Template deleted");

        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
