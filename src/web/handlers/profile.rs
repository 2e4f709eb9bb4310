//! Profile dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::dto::profile::{ProfileData, ProgressPointDto, StatisticsDto};
use crate::api::middleware::auth::CurrentUser;
use crate::dashboard::{
    EditMode, FeedbackDetail, HistoryCard, InterviewSettings, PLACEHOLDER_IMAGE,
    PerformanceAnalysis, ProfileDashboard, ServiceProfileApi, Tab,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProfilePageQuery {
    /// `statistics`, `history` or `settings`. Anything else shows statistics.
    pub tab: Option<String>,
    /// `1` or `true` opens the profile header in edit mode.
    pub edit: Option<String>,
}

impl ProfilePageQuery {
    fn wants_edit(&self) -> bool {
        matches!(self.edit.as_deref(), Some("1" | "true"))
    }
}

/// Button pressed on the profile edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    /// Also what pressing Enter in a field submits.
    #[default]
    Save,
    AddSkill,
    RemoveSkill(usize),
}

impl FormAction {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "save" => Some(Self::Save),
            "add_skill" => Some(Self::AddSkill),
            other => other
                .strip_prefix("remove_skill:")
                .and_then(|i| i.parse().ok())
                .map(Self::RemoveSkill),
        }
    }
}

/// The profile edit form.
///
/// Decoded from raw pairs because `skill` repeats once per skill and the
/// order of the inputs is the order of the skills. Absent fields keep the
/// stored value.
#[derive(Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub skills: Vec<String>,
    pub tab: Option<String>,
    pub action: FormAction,
}

impl ProfileForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = Some(value),
                "location" => form.location = Some(value),
                "bio" => form.bio = Some(value),
                "image" => form.image = Some(value),
                "skill" => form.skills.push(value),
                "tab" => form.tab = Some(value),
                "action" => {
                    if let Some(action) = FormAction::parse(&value) {
                        form.action = action;
                    }
                }
                _ => {}
            }
        }
        form
    }

    /// Copies the submitted values into an editing dashboard.
    ///
    /// Goes through the dashboard's edit operations, so nothing changes
    /// unless it is in [`EditMode::Editing`].
    pub fn apply(&self, dashboard: &mut ProfileDashboard) {
        if !dashboard.is_editing() {
            return;
        }

        if let Some(name) = &self.name {
            dashboard.set_name(name.as_str());
        }
        if let Some(location) = &self.location {
            dashboard.set_location(location.as_str());
        }
        if let Some(bio) = &self.bio {
            dashboard.set_bio(bio.as_str());
        }
        if let Some(image) = &self.image {
            dashboard.set_image(image.as_str());
        }

        while dashboard.profile().skills.len() > self.skills.len() {
            let last = dashboard.profile().skills.len() - 1;
            dashboard.remove_skill(last);
        }
        for (index, skill) in self.skills.iter().enumerate() {
            if index >= dashboard.profile().skills.len() {
                dashboard.add_skill();
            }
            dashboard.set_skill(index, skill.as_str());
        }
    }
}

pub struct TabLink {
    pub label: &'static str,
    pub slug: &'static str,
    pub active: bool,
}

pub struct SelectOption {
    pub label: String,
    pub selected: bool,
}

/// Template for the profile page, flattened from [`ProfileDashboard`].
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub tabs: Vec<TabLink>,
    pub active_tab: &'static str,
    pub error: Option<String>,
    pub editing: bool,
    pub profile: ProfileData,
    pub avatar: String,
    pub placeholder: &'static str,
    pub statistics: StatisticsDto,
    pub show_welcome: bool,
    pub show_progress_chart: bool,
    pub progress: Vec<ProgressPointDto>,
    pub progress_is_sample: bool,
    pub analysis: Option<PerformanceAnalysis>,
    pub history: Vec<HistoryCard>,
    pub durations: Vec<SelectOption>,
    pub detail_levels: Vec<SelectOption>,
    pub notifications: Vec<SelectOption>,
}

impl From<&ProfileDashboard> for ProfileTemplate {
    fn from(dashboard: &ProfileDashboard) -> Self {
        let settings: &InterviewSettings = dashboard.settings();

        ProfileTemplate {
            tabs: Tab::ALL
                .into_iter()
                .map(|tab| TabLink {
                    label: tab.label(),
                    slug: tab.slug(),
                    active: tab == dashboard.tab(),
                })
                .collect(),
            active_tab: dashboard.tab().slug(),
            error: dashboard.error().map(str::to_string),
            editing: dashboard.is_editing(),
            profile: dashboard.profile().clone(),
            avatar: dashboard.avatar().to_string(),
            placeholder: PLACEHOLDER_IMAGE,
            statistics: *dashboard.statistics(),
            show_welcome: dashboard.show_welcome(),
            show_progress_chart: dashboard.show_progress_chart(),
            progress: dashboard.progress().to_vec(),
            progress_is_sample: dashboard.progress_is_sample(),
            analysis: dashboard.performance_analysis(),
            history: dashboard.history_cards(),
            durations: InterviewSettings::DURATIONS
                .into_iter()
                .map(|minutes| SelectOption {
                    label: format!("{minutes} minutes"),
                    selected: minutes == settings.duration_minutes,
                })
                .collect(),
            detail_levels: FeedbackDetail::ALL
                .into_iter()
                .map(|level| SelectOption {
                    label: level.label().to_string(),
                    selected: level == settings.feedback_detail,
                })
                .collect(),
            notifications: settings
                .notifications
                .iter()
                .map(|(label, enabled)| SelectOption {
                    label: label.to_string(),
                    selected: *enabled,
                })
                .collect(),
        }
    }
}

/// Renders the profile dashboard for the signed-in user.
///
/// # Endpoint
///
/// `GET /profile?tab=statistics|history|settings[&edit=1]`
///
/// The page is rendered even when the profile cannot be loaded; it then
/// shows default values under an error banner. `edit=1` enters edit mode,
/// which makes no request of its own.
pub async fn profile_page_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ProfilePageQuery>,
) -> impl IntoResponse {
    let api = ServiceProfileApi::new(st.profile_service.clone(), user.id);

    let mut dashboard = ProfileDashboard::new();
    dashboard.load(&api).await;
    select_tab(&mut dashboard, query.tab.as_deref());

    if query.wants_edit() {
        dashboard.toggle_edit(&api).await;
    }

    ProfileTemplate::from(&dashboard)
}

/// Handles the profile edit form.
///
/// `POST /profile`
///
/// The page is stateless between requests, so the dashboard is reloaded,
/// put into edit mode and given the submitted values before the pressed
/// button is applied:
///
/// - `save` leaves edit mode with one PUT. On success the browser is sent
///   back to the page; on failure the form is shown again under the banner.
/// - `add_skill` and `remove_skill:<index>` only change the form.
///
/// The session cookie is `SameSite=Strict`, so other sites cannot submit it.
pub async fn update_profile_page_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = ProfileForm::from_pairs(pairs);
    let api = ServiceProfileApi::new(st.profile_service.clone(), user.id);

    let mut dashboard = ProfileDashboard::new();
    dashboard.load(&api).await;
    select_tab(&mut dashboard, form.tab.as_deref());
    dashboard.toggle_edit(&api).await;
    form.apply(&mut dashboard);

    match form.action {
        FormAction::Save => {
            if dashboard.toggle_edit(&api).await == EditMode::Viewing {
                let target = format!("/dashboard/profile?tab={}", dashboard.tab().slug());
                return Redirect::to(&target).into_response();
            }
        }
        FormAction::AddSkill => {
            dashboard.add_skill();
        }
        FormAction::RemoveSkill(index) => {
            dashboard.remove_skill(index);
        }
    }

    ProfileTemplate::from(&dashboard).into_response()
}

fn select_tab(dashboard: &mut ProfileDashboard, slug: Option<&str>) {
    if let Some(tab) = slug.and_then(Tab::from_slug) {
        dashboard.select_tab(tab);
    }
}
