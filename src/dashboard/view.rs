//! The profile dashboard state machine.
//!
//! ```text
//! load:      Loading ──ok──▶ Ready
//!                    └─err─▶ Degraded (defaults + banner)
//!
//! edit:      Viewing ──toggle──▶ Editing
//!            Editing ──toggle, PUT ok──▶ Viewing
//!            Editing ──toggle, PUT err─▶ Editing (+ banner)
//! ```
//!
//! Fetch failures never surface as errors to the caller; they become banner
//! text and the view keeps its defaults.

use std::collections::BTreeMap;

use crate::api::dto::profile::{
    InterviewDto, ProfileData, ProfileResponse, ProgressPointDto, StatisticsDto,
};

use super::client::{ClientError, ProfileApi};
use super::feedback::{InterviewFeedback, ScoreBand, parse_feedback};

pub const LOAD_FAILED: &str = "Failed to load profile data. Using default data.";
pub const SAVE_REJECTED: &str = "Failed to save profile changes";
pub const SAVE_FAILED: &str = "Error updating profile";

const DEFAULT_NAME: &str = "User";
const DEFAULT_LOCATION: &str = "Not specified";
const DEFAULT_BIO: &str = "No bio available";
const NEW_SKILL: &str = "New Skill";

/// Avatar shown when the user has no image or theirs fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/static/avatar-placeholder.svg";

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Statistics,
    InterviewHistory,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Statistics, Tab::InterviewHistory, Tab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Statistics => "Statistics",
            Tab::InterviewHistory => "Interview History",
            Tab::Settings => "Settings",
        }
    }

    /// Value of the `tab` query parameter.
    pub fn slug(self) -> &'static str {
        match self {
            Tab::Statistics => "statistics",
            Tab::InterviewHistory => "history",
            Tab::Settings => "settings",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Tab::ALL.into_iter().find(|tab| tab.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// The profile fetch failed; defaults are shown.
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

/// One rendered entry of the interview history tab.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCard {
    pub title: String,
    pub company: String,
    pub date: String,
    pub duration: String,
    pub score: f64,
    pub feedback: InterviewFeedback,
}

impl From<&InterviewDto> for HistoryCard {
    fn from(dto: &InterviewDto) -> Self {
        HistoryCard {
            title: non_empty_or(dto.title.as_deref(), "Mock Interview"),
            company: non_empty_or(dto.company.as_deref(), "Not Specified"),
            date: non_empty_or(dto.date.as_deref(), "Unknown date"),
            duration: dto.duration.clone().unwrap_or_default(),
            score: dto.score.unwrap_or(0.0),
            feedback: parse_feedback(dto.feedback.as_deref()),
        }
    }
}

/// Category averages across all structured feedback in the history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerformanceAnalysis {
    /// Categories averaging in the strong band, best first.
    pub strong: Vec<String>,
    /// Everything else, weakest first.
    pub improve: Vec<String>,
}

impl PerformanceAnalysis {
    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.improve.is_empty()
    }
}

/// Feedback verbosity offered on the settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackDetail {
    #[default]
    Detailed,
    Brief,
    Comprehensive,
}

impl FeedbackDetail {
    pub const ALL: [FeedbackDetail; 3] = [
        FeedbackDetail::Detailed,
        FeedbackDetail::Brief,
        FeedbackDetail::Comprehensive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FeedbackDetail::Detailed => "Detailed",
            FeedbackDetail::Brief => "Brief",
            FeedbackDetail::Comprehensive => "Comprehensive",
        }
    }
}

/// Local interview preferences. Never sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSettings {
    pub duration_minutes: u32,
    pub feedback_detail: FeedbackDetail,
    pub notifications: Vec<(&'static str, bool)>,
}

impl InterviewSettings {
    pub const DURATIONS: [u32; 3] = [45, 60, 90];

    /// Selects a duration; values not on offer are ignored.
    pub fn select_duration(&mut self, minutes: u32) -> bool {
        if Self::DURATIONS.contains(&minutes) {
            self.duration_minutes = minutes;
            true
        } else {
            false
        }
    }

    pub fn toggle_notification(&mut self, index: usize) {
        if let Some((_, enabled)) = self.notifications.get_mut(index) {
            *enabled = !*enabled;
        }
    }
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            duration_minutes: 45,
            feedback_detail: FeedbackDetail::default(),
            notifications: vec![
                ("Interview recording", true),
                ("Email notifications", true),
                ("Interview reminders", true),
                ("New features", true),
            ],
        }
    }
}

/// View-model of the profile page.
#[derive(Debug, Clone)]
pub struct ProfileDashboard {
    tab: Tab,
    load_state: LoadState,
    edit_mode: EditMode,
    profile: ProfileData,
    image: Option<String>,
    statistics: StatisticsDto,
    history: Vec<InterviewDto>,
    progress: Vec<ProgressPointDto>,
    progress_is_sample: bool,
    error: Option<String>,
    settings: InterviewSettings,
}

impl Default for ProfileDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileDashboard {
    /// A dashboard in the `Loading` state holding default values.
    pub fn new() -> Self {
        Self {
            tab: Tab::default(),
            load_state: LoadState::Loading,
            edit_mode: EditMode::Viewing,
            profile: default_profile(),
            image: None,
            statistics: StatisticsDto::default(),
            history: Vec::new(),
            progress: sample_progress(),
            progress_is_sample: true,
            error: None,
            settings: InterviewSettings::default(),
        }
    }

    /// Fetches the profile and the progress series.
    pub async fn load<A: ProfileApi + ?Sized>(&mut self, api: &A) {
        self.load_profile(api).await;
        self.load_progress(api).await;
    }

    /// Fetches the profile. Always leaves the `Loading` state.
    pub async fn load_profile<A: ProfileApi + ?Sized>(&mut self, api: &A) {
        self.error = None;

        match api.fetch_profile().await {
            Ok(response) => {
                self.apply(response);
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed, showing defaults");
                self.error = Some(LOAD_FAILED.to_string());
                self.load_state = LoadState::Degraded;
            }
        }
    }

    /// Fetches the progress series. Failures and empty series keep the
    /// current one.
    pub async fn load_progress<A: ProfileApi + ?Sized>(&mut self, api: &A) {
        match api.fetch_progress().await {
            Ok(points) if !points.is_empty() => {
                self.progress = points;
                self.progress_is_sample = false;
            }
            Ok(_) => {
                tracing::debug!("No progress data, keeping current series");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Progress fetch failed, keeping current series");
            }
        }
    }

    fn apply(&mut self, response: ProfileResponse) {
        if let Some(user) = response.user {
            self.profile = ProfileData {
                name: non_empty_or(user.name.as_deref(), DEFAULT_NAME),
                location: non_empty_or(user.location.as_deref(), DEFAULT_LOCATION),
                bio: non_empty_or(user.bio.as_deref(), DEFAULT_BIO),
                skills: user.skills.unwrap_or_default(),
            };
            if let Some(image) = user.image.filter(|i| !i.is_empty()) {
                self.image = Some(image);
            }
        }

        if let Some(statistics) = response.statistics {
            self.statistics = statistics;
        }

        if let Some(history) = response.interview_history {
            self.history = history;
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Enters edit mode, or saves and leaves it.
    ///
    /// Entering makes no request. Leaving issues one PUT with the whole
    /// profile and only returns to `Viewing` when the server accepts it.
    pub async fn toggle_edit<A: ProfileApi + ?Sized>(&mut self, api: &A) -> EditMode {
        match self.edit_mode {
            EditMode::Viewing => {
                self.edit_mode = EditMode::Editing;
            }
            EditMode::Editing => match api.update_profile(&self.profile).await {
                Ok(()) => {
                    self.edit_mode = EditMode::Viewing;
                }
                Err(ClientError::Status(status)) => {
                    tracing::warn!(status, "Profile save rejected");
                    self.error = Some(SAVE_REJECTED.to_string());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Profile save failed");
                    self.error = Some(SAVE_FAILED.to_string());
                }
            },
        }

        self.edit_mode
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> bool {
        self.edit(|p| p.name = value.into())
    }

    pub fn set_location(&mut self, value: impl Into<String>) -> bool {
        self.edit(|p| p.location = value.into())
    }

    pub fn set_bio(&mut self, value: impl Into<String>) -> bool {
        self.edit(|p| p.bio = value.into())
    }

    /// Appends a placeholder skill for the user to rename.
    pub fn add_skill(&mut self) -> bool {
        self.edit(|p| p.skills.push(NEW_SKILL.to_string()))
    }

    pub fn remove_skill(&mut self, index: usize) -> bool {
        self.edit(|p| {
            if index < p.skills.len() {
                p.skills.remove(index);
            }
        })
    }

    pub fn set_skill(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.edit(|p| {
            if let Some(skill) = p.skills.get_mut(index) {
                *skill = value.into();
            }
        })
    }

    /// Previews a locally chosen avatar (a URL or `data:` URL).
    ///
    /// Works in either edit mode. The image is not part of [`ProfileData`],
    /// so saving the profile never uploads it. Blank values are ignored.
    pub fn set_image(&mut self, src: impl Into<String>) {
        let src = src.into();
        if !src.trim().is_empty() {
            self.image = Some(src);
        }
    }

    /// Falls back to [`PLACEHOLDER_IMAGE`], e.g. after the current avatar
    /// failed to load.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Applies `change` only while editing. Returns whether it ran.
    fn edit(&mut self, change: impl FnOnce(&mut ProfileData)) -> bool {
        if self.edit_mode != EditMode::Editing {
            return false;
        }
        change(&mut self.profile);
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode == EditMode::Editing
    }

    pub fn profile(&self) -> &ProfileData {
        &self.profile
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// The image to render: the user's avatar or the placeholder.
    pub fn avatar(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn statistics(&self) -> &StatisticsDto {
        &self.statistics
    }

    pub fn progress(&self) -> &[ProgressPointDto] {
        &self.progress
    }

    /// Whether [`Self::progress`] is the built-in sample series rather than
    /// the user's data.
    pub fn progress_is_sample(&self) -> bool {
        self.progress_is_sample
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn settings(&self) -> &InterviewSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut InterviewSettings {
        &mut self.settings
    }

    pub fn has_interviews(&self) -> bool {
        self.statistics.total_interviews > 0
    }

    /// The statistics tab greets users who have not interviewed yet.
    pub fn show_welcome(&self) -> bool {
        !self.has_interviews()
    }

    pub fn show_progress_chart(&self) -> bool {
        self.has_interviews()
    }

    pub fn history_cards(&self) -> Vec<HistoryCard> {
        self.history.iter().map(HistoryCard::from).collect()
    }

    /// Strong and weak categories from the history's structured feedback.
    ///
    /// `None` until the user has interviewed at all.
    pub fn performance_analysis(&self) -> Option<PerformanceAnalysis> {
        if !self.has_interviews() {
            return None;
        }

        let mut totals: BTreeMap<String, (f64, u32)> = BTreeMap::new();
        for interview in &self.history {
            if let InterviewFeedback::Structured(feedback) =
                parse_feedback(interview.feedback.as_deref())
            {
                for category in feedback.categories {
                    let entry = totals.entry(category.name).or_insert((0.0, 0));
                    entry.0 += category.score;
                    entry.1 += 1;
                }
            }
        }

        let mut averages: Vec<(String, f64)> = totals
            .into_iter()
            .map(|(name, (sum, count))| (name, sum / f64::from(count)))
            .collect();
        averages.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (strong, rest): (Vec<_>, Vec<_>) = averages
            .into_iter()
            .partition(|(_, avg)| ScoreBand::from_score(*avg) == ScoreBand::Strong);

        Some(PerformanceAnalysis {
            strong: strong.into_iter().map(|(name, _)| name).collect(),
            improve: rest.into_iter().rev().map(|(name, _)| name).collect(),
        })
    }
}

fn default_profile() -> ProfileData {
    ProfileData {
        name: DEFAULT_NAME.to_string(),
        location: DEFAULT_LOCATION.to_string(),
        bio: DEFAULT_BIO.to_string(),
        skills: Vec::new(),
    }
}

/// Shown until the server returns a non-empty series.
fn sample_progress() -> Vec<ProgressPointDto> {
    [("Jan", 7.0), ("Feb", 7.5), ("Mar", 8.0), ("Apr", 8.5), ("May", 9.0)]
        .into_iter()
        .map(|(month, score)| ProgressPointDto {
            month: month.to_string(),
            score,
        })
        .collect()
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
