#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, middleware};
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use interview_hub::api::middleware::auth;
use interview_hub::domain::entities::{
    Interview, InterviewTotals, MonthlyScore, NewTemplate, NewUser, ProfileUpdate, Template, User,
};
use interview_hub::domain::repositories::{
    ProfileRepository, Session, SessionRepository, TemplateRepository,
};
use interview_hub::error::AppError;
use interview_hub::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn unavailable() -> AppError {
    AppError::internal("Database error: connection refused")
}

/// Template store keeping rows in memory.
///
/// Every insert is one second newer than the previous one, so list order
/// is deterministic.
#[derive(Default)]
pub struct InMemoryTemplates {
    rows: Mutex<Vec<Template>>,
    next_id: AtomicI64,
    pub failing: AtomicBool,
}

impl InMemoryTemplates {
    pub fn all(&self) -> Vec<Template> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_at(&self, user_id: &str, name: &str, created_at: DateTime<Utc>) -> Template {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let template = Template::new(
            id,
            name.to_string(),
            "Backend".to_string(),
            "Senior".to_string(),
            String::new(),
            user_id.to_string(),
            created_at,
        );
        self.rows.lock().unwrap().push(template.clone());
        template
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplates {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Template>, AppError> {
        self.check()?;
        let mut templates: Vec<Template> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(templates)
    }

    async fn create(&self, new_template: NewTemplate) -> Result<Template, AppError> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let template = Template::new(
            id,
            new_template.name,
            new_template.role,
            new_template.experience_level,
            new_template.description,
            new_template.user_id,
            base_time() + Duration::seconds(id),
        );
        self.rows.lock().unwrap().push(template.clone());
        Ok(template)
    }

    async fn delete(&self, id: i64, user_id: &str) -> Result<bool, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.id == id && t.is_owned_by(user_id)));
        Ok(rows.len() < before)
    }
}

/// Users and interviews kept in memory.
#[derive(Default)]
pub struct InMemoryProfiles {
    users: Mutex<Vec<User>>,
    interviews: Mutex<Vec<Interview>>,
    pub failing: AtomicBool,
}

impl InMemoryProfiles {
    pub fn add_user(&self, id: &str, name: Option<&str>) {
        self.users.lock().unwrap().push(User {
            id: id.to_string(),
            name: name.map(str::to_string),
            email: None,
            location: None,
            bio: None,
            skills: Vec::new(),
            image: None,
            created_at: base_time(),
        });
    }

    pub fn add_interview(&self, interview: Interview) {
        self.interviews.lock().unwrap().push(interview);
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }

    fn interviews_of(&self, user_id: &str) -> Vec<Interview> {
        self.interviews
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        Ok(self.user(user_id))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        self.check()?;
        if let Some(existing) = self.user(&new_user.id) {
            return Ok(existing);
        }
        self.add_user(&new_user.id, new_user.name.as_deref());
        self.user(&new_user.id)
            .ok_or_else(|| AppError::internal("insert lost"))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.check()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.name = Some(update.name);
        user.location = Some(update.location);
        user.bio = Some(update.bio);
        user.skills = update.skills;
        Ok(user.clone())
    }

    async fn interview_history(&self, user_id: &str) -> Result<Vec<Interview>, AppError> {
        self.check()?;
        let mut history = self.interviews_of(user_id);
        history.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(history)
    }

    async fn interview_totals(&self, user_id: &str) -> Result<InterviewTotals, AppError> {
        self.check()?;
        let history = self.interviews_of(user_id);
        let scores: Vec<f64> = history
            .iter()
            .filter(|i| i.completed)
            .filter_map(|i| i.score)
            .collect();

        Ok(InterviewTotals {
            total: history.len() as i64,
            completed: history.iter().filter(|i| i.completed).count() as i64,
            average_score: (!scores.is_empty())
                .then(|| scores.iter().sum::<f64>() / scores.len() as f64),
            total_minutes: history.iter().map(|i| i64::from(i.duration_minutes)).sum(),
        })
    }

    async fn monthly_scores(
        &self,
        user_id: &str,
        _months: i32,
    ) -> Result<Vec<MonthlyScore>, AppError> {
        self.check()?;
        let mut by_month: std::collections::BTreeMap<DateTime<Utc>, Vec<f64>> =
            Default::default();
        for interview in self.interviews_of(user_id) {
            if let (true, Some(score)) = (interview.completed, interview.score) {
                let month = Utc
                    .with_ymd_and_hms(
                        chrono::Datelike::year(&interview.started_at),
                        chrono::Datelike::month(&interview.started_at),
                        1,
                        0,
                        0,
                        0,
                    )
                    .unwrap();
                by_month.entry(month).or_default().push(score);
            }
        }

        Ok(by_month
            .into_iter()
            .map(|(month, scores)| MonthlyScore {
                month,
                average_score: scores.iter().sum::<f64>() / scores.len() as f64,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// Sessions keyed by token hash.
#[derive(Default)]
pub struct InMemorySessions {
    sessions: Mutex<Vec<Session>>,
    next_id: AtomicI64,
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn find_user_id(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.token_hash == token_hash && s.is_active())
            .map(|s| s.user_id.clone()))
    }

    async fn update_last_used(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_session(
        &self,
        user_id: &str,
        name: &str,
        token_hash: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Session, AppError> {
        let session = Session {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: user_id.to_string(),
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn revoke(&self, id: i64) -> Result<(), AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id && s.revoked_at.is_none())
            .ok_or_else(|| AppError::not_found("Session not found"))?;
        session.revoked_at = Some(Utc::now());
        Ok(())
    }
}

/// State plus handles on the stores behind it.
pub struct TestContext {
    pub state: AppState,
    pub templates: Arc<InMemoryTemplates>,
    pub profiles: Arc<InMemoryProfiles>,
    pub sessions: Arc<InMemorySessions>,
}

impl TestContext {
    /// Registers `user_id` and returns a valid session token for it.
    pub async fn login(&self, user_id: &str) -> String {
        if self.profiles.user(user_id).is_none() {
            self.profiles.add_user(user_id, None);
        }
        let (token, _) = self
            .state
            .auth_service
            .issue_session(user_id, "test", None)
            .await
            .unwrap();
        token
    }
}

pub fn create_test_context() -> TestContext {
    let templates = Arc::new(InMemoryTemplates::default());
    let profiles = Arc::new(InMemoryProfiles::default());
    let sessions = Arc::new(InMemorySessions::default());

    let state = AppState::new(
        templates.clone(),
        profiles.clone(),
        sessions.clone(),
        SIGNING_SECRET.to_string(),
    );

    TestContext {
        state,
        templates,
        profiles,
        sessions,
    }
}

/// Server exposing the `/api` routes behind the session layer.
pub fn api_server(ctx: &TestContext) -> TestServer {
    let api = interview_hub::api::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(ctx.state.clone(), auth::layer),
    );

    let app = Router::new()
        .nest("/api", api)
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

pub fn interview(
    user_id: &str,
    started_at: DateTime<Utc>,
    score: Option<f64>,
    feedback: Option<&str>,
) -> Interview {
    Interview {
        id: started_at.timestamp(),
        user_id: user_id.to_string(),
        title: Some("System Design Loop".to_string()),
        company: Some("Acme".to_string()),
        started_at,
        duration_minutes: 45,
        feedback: feedback.map(str::to_string),
        score,
        completed: score.is_some(),
    }
}
