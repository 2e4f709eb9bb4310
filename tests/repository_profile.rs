use sqlx::PgPool;
use std::sync::Arc;
use interview_hub::domain::entities::{NewUser, ProfileUpdate};
use interview_hub::domain::repositories::ProfileRepository;
use interview_hub::error::AppError;
use interview_hub::infrastructure::persistence::PgProfileRepository;

async fn create_interview(pool: &PgPool, user_id: &str, days_ago: i32, minutes: i32, score: Option<f64>) {
    sqlx::query(
        "INSERT INTO interviews (user_id, title, started_at, duration_minutes, score, completed)
         VALUES ($1, 'Mock', NOW() - make_interval(days => $2), $3, $4, $4 IS NOT NULL)",
    )
    .bind(user_id)
    .bind(days_ago)
    .bind(minutes)
    .bind(score)
    .execute(pool)
    .await
    .unwrap();
}

fn new_user(id: &str) -> NewUser {
    NewUser {
        id: id.to_string(),
        name: Some("Ada".to_string()),
        email: None,
    }
}

#[sqlx::test]
async fn test_create_user_is_idempotent(pool: PgPool) {
    let repo = PgProfileRepository::new(Arc::new(pool));

    let first = repo.create_user(new_user("ada")).await.unwrap();
    let second = repo
        .create_user(NewUser {
            name: Some("Other".to_string()),
            ..new_user("ada")
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name.as_deref(), Some("Ada"));
    assert_eq!(repo.list_users().await.unwrap().len(), 1);
}

#[sqlx::test]
async fn test_update_profile(pool: PgPool) {
    let repo = PgProfileRepository::new(Arc::new(pool));
    repo.create_user(new_user("ada")).await.unwrap();

    let user = repo
        .update_profile(
            "ada",
            ProfileUpdate {
                name: "Ada L".to_string(),
                location: "London".to_string(),
                bio: "Analyst".to_string(),
                skills: vec!["Math".to_string(), "Engines".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(user.name.as_deref(), Some("Ada L"));
    assert_eq!(user.skills, vec!["Math", "Engines"]);

    let missing = repo.update_profile("nobody", ProfileUpdate::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_interview_totals_and_history(pool: PgPool) {
    let pool_ref = pool.clone();
    let repo = PgProfileRepository::new(Arc::new(pool));
    repo.create_user(new_user("ada")).await.unwrap();

    create_interview(&pool_ref, "ada", 0, 30, Some(8.0)).await;
    create_interview(&pool_ref, "ada", 1, 60, Some(6.0)).await;
    create_interview(&pool_ref, "ada", 2, 45, None).await;

    let totals = repo.interview_totals("ada").await.unwrap();
    assert_eq!(totals.total, 3);
    assert_eq!(totals.completed, 2);
    assert_eq!(totals.average_score, Some(7.0));
    assert_eq!(totals.total_minutes, 135);

    let history = repo.interview_history("ada").await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].started_at >= history[1].started_at);

    let empty = repo.interview_totals("nobody").await.unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.average_score, None);
}

#[sqlx::test]
async fn test_monthly_scores_skip_unscored(pool: PgPool) {
    let pool_ref = pool.clone();
    let repo = PgProfileRepository::new(Arc::new(pool));
    repo.create_user(new_user("ada")).await.unwrap();

    create_interview(&pool_ref, "ada", 0, 30, Some(8.0)).await;
    create_interview(&pool_ref, "ada", 0, 30, None).await;
    create_interview(&pool_ref, "ada", 400, 30, Some(2.0)).await;

    let scores = repo.monthly_scores("ada", 6).await.unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].average_score, 8.0);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgProfileRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
