//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and decoded through `FromRow` row types, so the
//! crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgTemplateRepository`] - Template storage scoped per user
//! - [`PgProfileRepository`] - Users, profiles and interview aggregates
//! - [`PgSessionRepository`] - Session token storage and validation

pub mod pg_profile_repository;
pub mod pg_session_repository;
pub mod pg_template_repository;

pub use pg_profile_repository::PgProfileRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_template_repository::PgTemplateRepository;
