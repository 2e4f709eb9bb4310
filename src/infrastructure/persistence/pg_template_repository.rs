//! PostgreSQL implementation of the template repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTemplate, Template};
use crate::domain::repositories::TemplateRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: i64,
    name: String,
    role: String,
    experience_level: String,
    description: String,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl From<TemplateRow> for Template {
    fn from(r: TemplateRow) -> Self {
        Template::new(
            r.id,
            r.name,
            r.role,
            r.experience_level,
            r.description,
            r.user_id,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for templates.
///
/// Deletes are hard deletes filtered on both `id` and `user_id`.
pub struct PgTemplateRepository {
    pool: Arc<PgPool>,
}

impl PgTemplateRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Template>, AppError> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, name, role, experience_level, description, user_id, created_at
            FROM templates
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Template::from).collect())
    }

    async fn create(&self, new_template: NewTemplate) -> Result<Template, AppError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO templates (name, role, experience_level, description, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, role, experience_level, description, user_id, created_at
            "#,
        )
        .bind(&new_template.name)
        .bind(&new_template.role)
        .bind(&new_template.experience_level)
        .bind(&new_template.description)
        .bind(&new_template.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
