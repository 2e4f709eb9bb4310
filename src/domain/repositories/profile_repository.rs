//! Repository trait for users, their profiles and interview history.

use crate::domain::entities::{
    Interview, InterviewTotals, MonthlyScore, NewUser, ProfileUpdate, User,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface backing the profile endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Registers a user. Existing users are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Lists all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Replaces the editable profile fields of a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate)
    -> Result<User, AppError>;

    /// Returns the user's interviews, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn interview_history(&self, user_id: &str) -> Result<Vec<Interview>, AppError>;

    /// Aggregates counts, average score and time spent over the user's interviews.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn interview_totals(&self, user_id: &str) -> Result<InterviewTotals, AppError>;

    /// Average score per month over the last `months` months, oldest first.
    ///
    /// Months without completed, scored interviews are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn monthly_scores(&self, user_id: &str, months: i32)
    -> Result<Vec<MonthlyScore>, AppError>;

    /// Round-trips a trivial query to check connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
