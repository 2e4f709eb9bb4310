//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP
//! handlers, the dashboard and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::template_service::TemplateService`] - Template list/create/delete
//! - [`services::profile_service::ProfileService`] - Profile, statistics and progress
//! - [`services::auth_service::AuthService`] - Session token authentication

pub mod services;
