//! Repository trait for interview templates.

use crate::domain::entities::{NewTemplate, Template};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for templates.
///
/// Every operation is scoped by the owning user id; there is no way to read
/// or delete another user's template through this trait.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTemplateRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Lists all templates owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Template>, AppError>;

    /// Persists a new template.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_template: NewTemplate) -> Result<Template, AppError>;

    /// Deletes the template with `id` if it is owned by `user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a row was deleted
    /// - `Ok(false)` if no template matched both id and owner
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64, user_id: &str) -> Result<bool, AppError>;
}
