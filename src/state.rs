//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ProfileService, TemplateService};
use crate::domain::repositories::{ProfileRepository, SessionRepository, TemplateRepository};

/// Services shared by all requests.
///
/// Services hold repository trait objects so the same router serves
/// PostgreSQL in production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub template_service: Arc<TemplateService<dyn TemplateRepository>>,
    pub profile_service: Arc<ProfileService<dyn ProfileRepository>>,
    pub auth_service: Arc<AuthService<dyn SessionRepository>>,
}

impl AppState {
    /// Builds the state from repository implementations.
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        profiles: Arc<dyn ProfileRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_signing_secret: String,
    ) -> Self {
        Self {
            template_service: Arc::new(TemplateService::new(templates)),
            profile_service: Arc::new(ProfileService::new(profiles)),
            auth_service: Arc::new(AuthService::new(sessions, session_signing_secret)),
        }
    }
}
