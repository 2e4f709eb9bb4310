//! Profile dashboard view-model.
//!
//! The dashboard owns the client-side state of the profile page: the active
//! tab, the load lifecycle, the edit-mode state machine over the profile
//! fields, and the parsed interview history. It reads and writes through
//! [`ProfileApi`], so the same view-model drives the server-rendered page
//! ([`ServiceProfileApi`]) and remote clients such as the admin CLI
//! ([`HttpProfileApi`]).
//!
//! # Modules
//!
//! - [`client`] - The [`ProfileApi`] seam and its implementations
//! - [`feedback`] - Lenient parsing of structured interview feedback
//! - [`view`] - [`ProfileDashboard`] and the types it renders into

pub mod client;
pub mod feedback;
pub mod view;

pub use client::{ClientError, HttpProfileApi, ProfileApi, ServiceProfileApi};
pub use feedback::{InterviewFeedback, ScoreBand, StructuredFeedback, parse_feedback};
pub use view::{
    EditMode, FeedbackDetail, HistoryCard, InterviewSettings, LoadState, PLACEHOLDER_IMAGE,
    PerformanceAnalysis, ProfileDashboard, Tab,
};

#[cfg(test)]
pub use client::MockProfileApi;
