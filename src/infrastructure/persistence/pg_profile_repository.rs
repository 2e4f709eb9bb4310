//! PostgreSQL implementation of the profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    Interview, InterviewTotals, MonthlyScore, NewUser, ProfileUpdate, User,
};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, name, email, location, bio, skills, image, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: Option<String>,
    email: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    skills: Vec<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            name: r.name,
            email: r.email,
            location: r.location,
            bio: r.bio,
            skills: r.skills,
            image: r.image,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InterviewRow {
    id: i64,
    user_id: String,
    title: Option<String>,
    company: Option<String>,
    started_at: DateTime<Utc>,
    duration_minutes: i32,
    feedback: Option<String>,
    score: Option<f64>,
    completed: bool,
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    total: i64,
    completed: i64,
    average_score: Option<f64>,
    total_minutes: i64,
}

#[derive(sqlx::FromRow)]
struct MonthlyRow {
    month: DateTime<Utc>,
    average_score: f64,
}

/// PostgreSQL repository for users and their interview history.
///
/// Aggregates are computed in SQL so the service layer only formats them.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.id)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                name       = $2,
                location   = $3,
                bio        = $4,
                skills     = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.location)
        .bind(&update.bio)
        .bind(&update.skills)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::from)
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    async fn interview_history(&self, user_id: &str) -> Result<Vec<Interview>, AppError> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            r#"
            SELECT id, user_id, title, company, started_at, duration_minutes,
                   feedback, score, completed
            FROM interviews
            WHERE user_id = $1
            ORDER BY started_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Interview {
                id: r.id,
                user_id: r.user_id,
                title: r.title,
                company: r.company,
                started_at: r.started_at,
                duration_minutes: r.duration_minutes,
                feedback: r.feedback,
                score: r.score,
                completed: r.completed,
            })
            .collect())
    }

    async fn interview_totals(&self, user_id: &str) -> Result<InterviewTotals, AppError> {
        let row = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT
                COUNT(*)::BIGINT                                               AS total,
                COUNT(*) FILTER (WHERE completed)::BIGINT                      AS completed,
                (AVG(score) FILTER (WHERE completed AND score IS NOT NULL))::DOUBLE PRECISION
                                                                               AS average_score,
                COALESCE(SUM(duration_minutes), 0)::BIGINT                     AS total_minutes
            FROM interviews
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(InterviewTotals {
            total: row.total,
            completed: row.completed,
            average_score: row.average_score,
            total_minutes: row.total_minutes,
        })
    }

    async fn monthly_scores(
        &self,
        user_id: &str,
        months: i32,
    ) -> Result<Vec<MonthlyScore>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyRow>(
            r#"
            SELECT
                date_trunc('month', started_at)     AS month,
                AVG(score)::DOUBLE PRECISION        AS average_score
            FROM interviews
            WHERE user_id = $1
              AND completed
              AND score IS NOT NULL
              AND started_at >= date_trunc('month', NOW()) - make_interval(months => $2::INT - 1)
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(user_id)
        .bind(months)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MonthlyScore {
                month: r.month,
                average_score: r.average_score,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
