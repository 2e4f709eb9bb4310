//! Template entity representing a saved interview configuration.

use chrono::{DateTime, Utc};

/// A saved interview configuration owned by a single user.
///
/// Templates are immutable once created: they can be listed and deleted
/// but never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub experience_level: String,
    pub description: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// Creates a new Template instance.
    pub fn new(
        id: i64,
        name: String,
        role: String,
        experience_level: String,
        description: String,
        user_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            role,
            experience_level,
            description,
            user_id,
            created_at,
        }
    }

    /// Returns true if `user_id` owns this template.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new template.
///
/// All fields are already validated; `description` is empty when the
/// client did not provide one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub experience_level: String,
    pub description: String,
}
