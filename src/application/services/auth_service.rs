//! Authentication service for session tokens.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::{Session, SessionRepository};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated session tokens.
const TOKEN_LEN: usize = 48;

/// Resolves opaque session tokens to user ids and issues new sessions.
///
/// Only `HMAC-SHA256(signing_secret, token)` is ever stored or compared.
pub struct AuthService<R: SessionRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: SessionRepository + ?Sized> AuthService<R> {
    /// `signing_secret` has to be the one the stored sessions were hashed with.
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Lowercase hex of the token's MAC (64 chars).
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves a raw session token to the id of the user it belongs to.
    ///
    /// On success the session's `last_used_at` is refreshed; a failure to
    /// record usage does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty, unknown,
    /// revoked or expired.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<String, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::authentication_required());
        }

        let token_hash = self.hash_token(token);

        let user_id = self
            .repository
            .find_user_id(&token_hash)
            .await?
            .ok_or_else(AppError::authentication_required)?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to record session usage");
        }

        Ok(user_id)
    }

    /// Issues a new session for `user_id` and returns the raw token with the stored record.
    ///
    /// The raw token is not recoverable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue_session(
        &self,
        user_id: &str,
        name: &str,
        ttl: Option<Duration>,
    ) -> Result<(String, Session), AppError> {
        let token = generate_token();
        let expires_at = ttl.map(|ttl| Utc::now() + ttl);

        let session = self
            .repository
            .create_session(user_id, name, &self.hash_token(&token), expires_at)
            .await?;

        tracing::info!(user_id, session_id = session.id, "Session issued");

        Ok((token, session))
    }
}

/// Generates a random alphanumeric session token.
///
/// 48 characters from `[A-Za-z0-9]`, roughly 286 bits of entropy.
pub fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
