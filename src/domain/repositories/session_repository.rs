//! Repository trait for session tokens issued by the auth provider.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Session token record.
///
/// Only the HMAC hash of the token is stored; the raw token is handed to
/// the client once when the session is issued.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Returns true if the session can still authenticate requests.
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none() && self.expires_at.is_none_or(|e| Utc::now() < e)
    }
}

/// Repository interface for session lookup and management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Resolves a token hash to the owning user id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user_id))` if the session exists, is not revoked and not expired
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user_id(&self, token_hash: &str) -> Result<Option<String>, AppError>;

    /// Updates the `last_used_at` timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including an
    /// unknown `user_id`.
    async fn create_session(
        &self,
        user_id: &str,
        name: &str,
        token_hash: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Session, AppError>;

    /// Lists all sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError>;

    /// Finds a session by its database id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, AppError>;

    /// Revokes a session, preventing further authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session does not exist or is already revoked.
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: Option<DateTime<Utc>>, revoked_at: Option<DateTime<Utc>>) -> Session {
        Session {
            id: 1,
            user_id: "user-1".to_string(),
            name: "laptop".to_string(),
            token_hash: "hash".to_string(),
            created_at: Utc::now(),
            expires_at,
            revoked_at,
        }
    }

    #[test]
    fn test_session_active() {
        assert!(session(None, None).is_active());
        assert!(session(Some(Utc::now() + Duration::hours(1)), None).is_active());
    }

    #[test]
    fn test_session_expired_or_revoked() {
        assert!(!session(Some(Utc::now() - Duration::hours(1)), None).is_active());
        assert!(!session(None, Some(Utc::now())).is_active());
    }
}
