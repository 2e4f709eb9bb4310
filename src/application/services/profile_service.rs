//! Profile, statistics and progress service.

use std::sync::Arc;

use crate::domain::entities::{Interview, InterviewTotals, NewUser, ProfileUpdate, User};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

/// Number of calendar months covered by the progress series.
pub const PROGRESS_MONTHS: i32 = 6;

/// Interview statistics shown on the dashboard overview.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub total_interviews: i64,
    pub completed_interviews: i64,
    /// Mean score of completed interviews, one decimal place.
    pub average_score: f64,
    /// Hours spent interviewing, one decimal place.
    pub total_time_spent: f64,
}

impl From<InterviewTotals> for Statistics {
    fn from(totals: InterviewTotals) -> Self {
        Statistics {
            total_interviews: totals.total,
            completed_interviews: totals.completed,
            average_score: round1(totals.average_score.unwrap_or(0.0)),
            total_time_spent: round1(totals.total_minutes as f64 / 60.0),
        }
    }
}

/// One point of the progress chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    /// Three-letter month label, e.g. `Jan`.
    pub month: String,
    pub score: f64,
}

/// Everything the profile page needs in one read.
#[derive(Debug, Clone)]
pub struct ProfileOverview {
    pub user: User,
    pub statistics: Statistics,
    pub history: Vec<Interview>,
}

/// Service backing the profile endpoints and the dashboard.
pub struct ProfileService<R: ProfileRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ProfileRepository + ?Sized> ProfileService<R> {
    /// Creates a new profile service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Loads the user's profile, statistics and interview history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_overview(&self, user_id: &str) -> Result<ProfileOverview, AppError> {
        let user = self
            .repository
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        let totals = self.repository.interview_totals(user_id).await?;
        let history = self.repository.interview_history(user_id).await?;

        Ok(ProfileOverview {
            user,
            statistics: totals.into(),
            history,
        })
    }

    /// Monthly average scores for the last [`PROGRESS_MONTHS`] months, oldest first.
    ///
    /// Returns an empty series when the user has no scored interviews; the
    /// client decides what to show instead.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_progress(&self, user_id: &str) -> Result<Vec<ProgressPoint>, AppError> {
        let scores = self
            .repository
            .monthly_scores(user_id, PROGRESS_MONTHS)
            .await?;

        Ok(scores
            .into_iter()
            .map(|s| ProgressPoint {
                month: s.month.format("%b").to_string(),
                score: round1(s.average_score),
            })
            .collect())
    }

    /// Replaces the editable profile fields.
    ///
    /// Skills are trimmed and blank entries dropped; everything else is
    /// stored as sent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_profile(
        &self,
        user_id: &str,
        mut update: ProfileUpdate,
    ) -> Result<User, AppError> {
        update.skills = update
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let user = self.repository.update_profile(user_id, update).await?;

        tracing::info!(user_id, "Profile updated");

        Ok(user)
    }

    /// Registers a user, returning the existing record if already known.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `id` is blank.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_user(&self, new_user: NewUser) -> Result<User, AppError> {
        if new_user.id.trim().is_empty() {
            return Err(AppError::bad_request("User id is required"));
        }
        self.repository.create_user(new_user).await
    }

    /// Lists all registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list_users().await
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
