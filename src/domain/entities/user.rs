//! User entity and the editable profile subset.

use chrono::{DateTime, Utc};

/// A user known to the service.
///
/// `id` is the subject issued by the external auth provider. Everything but
/// the id is optional because the provider may not have supplied it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Full replacement of the editable profile fields.
///
/// The dashboard always sends every field, so there is no partial-update
/// form: an empty `skills` list clears the skills.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub location: String,
    pub bio: String,
    pub skills: Vec<String>,
}
