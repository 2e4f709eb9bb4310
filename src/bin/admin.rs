//! CLI administration tool for interview-hub.
//!
//! Manages users and sessions, shows statistics, checks the database and
//! renders a user's dashboard in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Register a user by auth provider subject
//! cargo run --bin admin -- user create --id github|1234 --name "Ada"
//!
//! # Issue a session token for that user
//! cargo run --bin admin -- session create --user github|1234
//!
//! # Revoke a session
//! cargo run --bin admin -- session revoke 3
//!
//! # Render a dashboard through the HTTP API
//! cargo run --bin admin -- profile show --url http://localhost:3000 --token <token>
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for all but `profile show`)
//! - `SESSION_SIGNING_SECRET` (required for `session create`)

use interview_hub::application::services::{AuthService, ProfileService};
use interview_hub::dashboard::{HttpProfileApi, InterviewFeedback, ProfileDashboard};
use interview_hub::domain::entities::NewUser;
use interview_hub::domain::repositories::{ProfileRepository, SessionRepository};
use interview_hub::infrastructure::persistence::{PgProfileRepository, PgSessionRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use url::Url;

/// CLI tool for managing interview-hub.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage session tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect a user's dashboard
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a user
    Create {
        /// Auth provider subject
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Issue a session token for a user
    Create {
        /// User id the session belongs to
        #[arg(short, long)]
        user: String,

        /// Label shown in `session list`
        #[arg(short, long, default_value = "admin")]
        name: String,

        /// Expire the session after this many days
        #[arg(long)]
        ttl_days: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all sessions
    List,

    /// Revoke a session by id
    Revoke { id: i64 },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Load a dashboard over HTTP and print it
    Show {
        /// Service base URL
        #[arg(long, default_value = "http://localhost:3000")]
        url: Url,

        /// Session token of the user to inspect
        #[arg(long, env = "SESSION_TOKEN")]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::User { action } => handle_user_action(action, &connect().await?).await?,
        Commands::Session { action } => handle_session_action(action, &connect().await?).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Profile { action } => handle_profile_action(action).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn profile_service(pool: &PgPool) -> ProfileService<dyn ProfileRepository> {
    let repo: Arc<dyn ProfileRepository> =
        Arc::new(PgProfileRepository::new(Arc::new(pool.clone())));
    ProfileService::new(repo)
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = profile_service(pool);

    match action {
        UserAction::Create { id, name, email } => {
            println!("{}", "👤 Create User".bright_blue().bold());
            println!();

            let id = match id {
                Some(id) => id,
                None => Input::new()
                    .with_prompt("Auth provider subject")
                    .interact_text()?,
            };

            let user = service
                .register_user(NewUser { id, name, email })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!("{}", "✅ User ready".green().bold());
            println!("  ID:   {}", user.id.cyan());
            println!("  Name: {}", user.name.as_deref().unwrap_or("-"));
            println!();
        }
        UserAction::List => {
            println!("{}", "📋 Users".bright_blue().bold());
            println!();

            let users = service
                .list_users()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<32} {:<24} {:<20}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(76).bright_black());

            for user in &users {
                println!(
                    "  {:<32} {:<24} {}",
                    user.id.cyan(),
                    user.name.as_deref().unwrap_or("-"),
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!("  Total: {}", users.len().to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo: Arc<dyn SessionRepository> =
        Arc::new(PgSessionRepository::new(Arc::new(pool.clone())));

    match action {
        SessionAction::Create {
            user,
            name,
            ttl_days,
            yes,
        } => create_session(repo, user, name, ttl_days, yes).await?,
        SessionAction::List => list_sessions(repo).await?,
        SessionAction::Revoke { id } => revoke_session(repo, id).await?,
    }

    Ok(())
}

/// Issues a session token. Only its HMAC hash is stored, so the raw token
/// is printed once and cannot be retrieved later.
async fn create_session(
    repo: Arc<dyn SessionRepository>,
    user_id: String,
    name: String,
    ttl_days: Option<i64>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Session".bright_blue().bold());
    println!();

    let secret =
        std::env::var("SESSION_SIGNING_SECRET").context("SESSION_SIGNING_SECRET must be set")?;
    let auth = AuthService::new(repo, secret);

    println!("  User: {}", user_id.cyan());
    println!("  Name: {}", name.cyan());
    if let Some(days) = ttl_days {
        println!("  TTL:  {} days", days);
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue this session?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let (token, session) = auth
        .issue_session(&user_id, &name, ttl_days.map(chrono::Duration::days))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create session: {}", e))?;

    println!();
    println!("{}", "✅ Session created!".green().bold());
    println!("  ID:    {}", session.id.to_string().bright_black());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/templates",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_sessions(repo: Arc<dyn SessionRepository>) -> Result<()> {
    println!("{}", "📋 Sessions".bright_blue().bold());
    println!();

    let sessions = repo
        .list_sessions()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sessions: {}", e))?;

    if sessions.is_empty() {
        println!("{}", "  No sessions found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<24} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for session in &sessions {
        let status = if session.revoked_at.is_some() {
            "REVOKED".red()
        } else if session.is_active() {
            "ACTIVE".green()
        } else {
            "EXPIRED".yellow()
        };

        println!(
            "  {:<5} {:<24} {:<20} {:<20} {}",
            session.id.to_string().bright_black(),
            session.user_id.cyan(),
            session.name,
            session
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", sessions.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn revoke_session(repo: Arc<dyn SessionRepository>, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke Session".bright_blue().bold());
    println!();

    let session = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Session not found")?;

    if session.revoked_at.is_some() {
        println!("{}", "⚠️  This session is already revoked".yellow());
        return Ok(());
    }

    println!("  Session: {}", session.name.cyan());
    println!("  User:    {}", session.user_id.cyan());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this session?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke(session.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

    println!();
    println!("{}", "✅ Session revoked".green().bold());
    println!();

    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let templates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM templates")
        .fetch_one(pool)
        .await?;

    let interviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interviews")
        .fetch_one(pool)
        .await?;

    let sessions: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sessions
         WHERE revoked_at IS NULL AND (expires_at IS NULL OR expires_at > NOW())",
    )
    .fetch_one(pool)
    .await?;

    println!("  Users:           {}", users.to_string().bright_green().bold());
    println!("  Templates:       {}", templates.to_string().bright_green().bold());
    println!("  Interviews:      {}", interviews.to_string().bright_green().bold());
    println!("  Active sessions: {}", sessions.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

async fn handle_profile_action(action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show { url, token } => {
            let api = HttpProfileApi::new(&url, token)?;
            let mut dashboard = ProfileDashboard::new();
            dashboard.load(&api).await;
            print_dashboard(&dashboard);
        }
    }

    Ok(())
}

fn print_dashboard(dashboard: &ProfileDashboard) {
    if let Some(error) = dashboard.error() {
        println!("{}", format!("⚠️  {error}").yellow());
        println!();
    }

    let profile = dashboard.profile();
    println!("{}", profile.name.bright_blue().bold());
    println!("  {}", profile.location.bright_black());
    println!("  {}", profile.bio);
    if !profile.skills.is_empty() {
        println!("  Skills: {}", profile.skills.join(", ").cyan());
    }
    println!();

    let stats = dashboard.statistics();
    println!("{}", "📊 Statistics".bright_white().bold());
    println!("  Total interviews: {}", stats.total_interviews.to_string().bright_green());
    println!("  Completed:        {}", stats.completed_interviews.to_string().bright_green());
    println!("  Average score:    {}", stats.average_score.to_string().bright_green());
    println!("  Time spent:       {} hours", stats.total_time_spent.to_string().bright_green());
    println!();

    if dashboard.show_welcome() {
        println!("{}", "  Welcome! Take your first interview to see your statistics here.".cyan());
        println!();
        return;
    }

    if let Some(analysis) = dashboard.performance_analysis()
        && !analysis.is_empty()
    {
        println!("{}", "🎯 Performance".bright_white().bold());
        println!("  Strong:  {}", analysis.strong.join(", ").green());
        println!("  Improve: {}", analysis.improve.join(", ").yellow());
        println!();
    }

    let sample = if dashboard.progress_is_sample() { " (sample data)" } else { "" };
    println!("{}{}", "📈 Progress".bright_white().bold(), sample.bright_black());
    for point in dashboard.progress() {
        println!("  {:<4} {:>4.1} {}", point.month, point.score, "▇".repeat(point.score.round().max(0.0) as usize).cyan());
    }
    println!();

    println!("{}", "📋 Interview History".bright_white().bold());
    for card in dashboard.history_cards() {
        println!(
            "  {} · {} · {} · {}  {}",
            card.title.bright_white(),
            card.company,
            card.date.bright_black(),
            card.duration.bright_black(),
            format!("{}/10", card.score).bright_green()
        );
        match &card.feedback {
            InterviewFeedback::Structured(feedback) => {
                for category in &feedback.categories {
                    println!("    {:<24} {:>5}/100", category.name, category.score);
                }
                for strength in &feedback.strengths {
                    println!("    + {}", strength.green());
                }
                for improvement in &feedback.improvements {
                    println!("    - {}", improvement.yellow());
                }
            }
            other => {
                if let Some(text) = other.plain_text() {
                    println!("    {}", text.bright_black());
                }
            }
        }
    }
    println!();
}
