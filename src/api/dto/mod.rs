//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde with camelCase field names, matching what the
//! browser dashboard sends and expects.

pub mod health;
pub mod profile;
pub mod template;
