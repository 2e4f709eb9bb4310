//! DTOs for profile endpoints.
//!
//! These types are shared with [`crate::dashboard`]: the server serializes
//! them and the dashboard client deserializes them. Every field the client
//! reads is optional or defaulted so a partial response still decodes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{ProfileOverview, ProgressPoint, Statistics};
use crate::domain::entities::{Interview, ProfileUpdate, User};

/// Query string of `GET /api/profile`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    /// `progress` selects the progress series instead of the profile.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ProfileQuery {
    pub fn wants_progress(&self) -> bool {
        self.kind.as_deref() == Some("progress")
    }
}

/// The editable profile fields.
///
/// Body of `PUT /api/profile` and the dashboard's local edit model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub location: String,

    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub bio: String,

    #[validate(length(max = 50, message = "must contain at most 50 skills"))]
    #[serde(default)]
    pub skills: Vec<String>,
}

impl From<ProfileData> for ProfileUpdate {
    fn from(data: ProfileData) -> Self {
        ProfileUpdate {
            name: data.name,
            location: data.location,
            bio: data.bio,
            skills: data.skills,
        }
    }
}

/// User profile as returned to clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub image: Option<String>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        UserDto {
            id: Some(u.id),
            name: u.name,
            email: u.email,
            location: u.location,
            bio: u.bio,
            skills: Some(u.skills),
            image: u.image,
        }
    }
}

/// Interview statistics as returned to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsDto {
    pub total_interviews: i64,
    pub completed_interviews: i64,
    pub average_score: f64,
    pub total_time_spent: f64,
}

impl From<Statistics> for StatisticsDto {
    fn from(s: Statistics) -> Self {
        StatisticsDto {
            total_interviews: s.total_interviews,
            completed_interviews: s.completed_interviews,
            average_score: s.average_score,
            total_time_spent: s.total_time_spent,
        }
    }
}

/// One interview history record.
///
/// `date` and `duration` are preformatted for display, e.g. `Sep 14, 2025`
/// and `45 min`. `feedback` is passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewDto {
    pub title: Option<String>,
    pub company: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
    pub feedback: Option<String>,
    pub score: Option<f64>,
}

impl From<Interview> for InterviewDto {
    fn from(i: Interview) -> Self {
        InterviewDto {
            title: i.title,
            company: i.company,
            date: Some(i.started_at.format("%b %-d, %Y").to_string()),
            duration: Some(format!("{} min", i.duration_minutes)),
            feedback: i.feedback,
            score: i.score,
        }
    }
}

/// Response of `GET /api/profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileResponse {
    pub user: Option<UserDto>,
    pub statistics: Option<StatisticsDto>,
    pub interview_history: Option<Vec<InterviewDto>>,
}

impl From<ProfileOverview> for ProfileResponse {
    fn from(o: ProfileOverview) -> Self {
        ProfileResponse {
            user: Some(o.user.into()),
            statistics: Some(o.statistics.into()),
            interview_history: Some(o.history.into_iter().map(InterviewDto::from).collect()),
        }
    }
}

/// One point of `GET /api/profile?type=progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPointDto {
    pub month: String,
    pub score: f64,
}

impl From<ProgressPoint> for ProgressPointDto {
    fn from(p: ProgressPoint) -> Self {
        ProgressPointDto {
            month: p.month,
            score: p.score,
        }
    }
}

/// Response of `PUT /api/profile`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub user: UserDto,
}
