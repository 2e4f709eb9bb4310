//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`TemplateRepository`] - Per-user interview templates
//! - [`ProfileRepository`] - Users, profiles and interview history
//! - [`SessionRepository`] - Session token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod profile_repository;
pub mod session_repository;
pub mod template_repository;

pub use profile_repository::ProfileRepository;
pub use session_repository::{Session, SessionRepository};
pub use template_repository::TemplateRepository;

#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
