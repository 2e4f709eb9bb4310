//! Access to the profile endpoints from the dashboard.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;
use validator::Validate;

use crate::api::dto::profile::{ProfileData, ProfileResponse, ProgressPointDto};
use crate::application::services::ProfileService;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

/// Failures reaching the profile API.
///
/// The dashboard distinguishes a server that answered with a non-2xx status
/// from one that could not be reached at all.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ClientError::Status(status.as_u16())
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<AppError> for ClientError {
    fn from(e: AppError) -> Self {
        ClientError::Status(e.status().as_u16())
    }
}

/// The three profile calls the dashboard makes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// `GET /api/profile`
    async fn fetch_profile(&self) -> Result<ProfileResponse, ClientError>;

    /// `GET /api/profile?type=progress`
    async fn fetch_progress(&self) -> Result<Vec<ProgressPointDto>, ClientError>;

    /// `PUT /api/profile` with the full profile.
    async fn update_profile(&self, profile: &ProfileData) -> Result<(), ClientError>;
}

/// [`ProfileApi`] over HTTP with a bearer session token.
pub struct HttpProfileApi {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl HttpProfileApi {
    /// Creates a client for the service at `base_url`, e.g. `http://localhost:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the URL cannot be joined or the
    /// underlying client fails to build.
    pub fn new(base_url: &Url, token: impl Into<String>) -> Result<Self, ClientError> {
        let endpoint = base_url
            .join("/api/profile")
            .map_err(|e| ClientError::Transport(format!("Invalid base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("interview-hub/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: token.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(query)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(&self) -> Result<ProfileResponse, ClientError> {
        self.get_json(&[]).await
    }

    async fn fetch_progress(&self) -> Result<Vec<ProgressPointDto>, ClientError> {
        self.get_json(&[("type", "progress")]).await
    }

    async fn update_profile(&self, profile: &ProfileData) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(profile)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status(status.as_u16()))
        }
    }
}

/// [`ProfileApi`] answered in-process by [`ProfileService`] for one user.
///
/// Used by the server-rendered dashboard, which already knows the user from
/// the session cookie.
pub struct ServiceProfileApi {
    service: Arc<ProfileService<dyn ProfileRepository>>,
    user_id: String,
}

impl ServiceProfileApi {
    pub fn new(service: Arc<ProfileService<dyn ProfileRepository>>, user_id: String) -> Self {
        Self { service, user_id }
    }
}

#[async_trait]
impl ProfileApi for ServiceProfileApi {
    async fn fetch_profile(&self) -> Result<ProfileResponse, ClientError> {
        let overview = self.service.get_overview(&self.user_id).await?;
        Ok(overview.into())
    }

    async fn fetch_progress(&self) -> Result<Vec<ProgressPointDto>, ClientError> {
        let points = self.service.get_progress(&self.user_id).await?;
        Ok(points.into_iter().map(ProgressPointDto::from).collect())
    }

    async fn update_profile(&self, profile: &ProfileData) -> Result<(), ClientError> {
        profile.validate().map_err(AppError::from)?;
        self.service
            .update_profile(&self.user_id, profile.clone().into())
            .await?;
        Ok(())
    }
}
