//! Business logic services for the application layer.

pub mod auth_service;
pub mod profile_service;
pub mod template_service;

pub use auth_service::AuthService;
pub use profile_service::{ProfileOverview, ProfileService, ProgressPoint, Statistics};
pub use template_service::{CreateTemplate, TemplateService};
