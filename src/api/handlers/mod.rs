//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod profile;
pub mod templates;

pub use health::health_handler;
pub use profile::{get_profile_handler, update_profile_handler};
pub use templates::{create_template_handler, delete_template_handler, list_templates_handler};
