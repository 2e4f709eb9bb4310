//! Interview history records and the aggregates computed from them.

use chrono::{DateTime, Utc};

/// A past interview session.
#[derive(Debug, Clone, PartialEq)]
pub struct Interview {
    pub id: i64,
    pub user_id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    /// Evaluation text; may be a JSON document produced by the grader.
    pub feedback: Option<String>,
    pub score: Option<f64>,
    pub completed: bool,
}

/// Raw interview aggregates for one user.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterviewTotals {
    pub total: i64,
    pub completed: i64,
    /// Mean score over completed interviews, `None` when nothing is scored.
    pub average_score: Option<f64>,
    pub total_minutes: i64,
}

/// Average score of the completed interviews started in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyScore {
    pub month: DateTime<Utc>,
    pub average_score: f64,
}
