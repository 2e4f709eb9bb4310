use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use interview_hub::domain::repositories::SessionRepository;
use interview_hub::infrastructure::persistence::PgSessionRepository;

async fn create_user(pool: &PgPool, id: &str) {
    sqlx::query("INSERT INTO users (id) VALUES ($1)")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test]
async fn test_create_and_find_session(pool: PgPool) {
    create_user(&pool, "ada").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    let session = repo
        .create_session("ada", "laptop", "hash-1", None)
        .await
        .unwrap();

    assert_eq!(session.user_id, "ada");
    assert!(session.is_active());
    assert_eq!(
        repo.find_user_id("hash-1").await.unwrap().as_deref(),
        Some("ada")
    );
    assert!(repo.find_user_id("other").await.unwrap().is_none());
    assert!(repo.update_last_used("hash-1").await.is_ok());
}

#[sqlx::test]
async fn test_expired_session_is_rejected(pool: PgPool) {
    create_user(&pool, "ada").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    repo.create_session("ada", "old", "hash-old", Some(Utc::now() - Duration::hours(1)))
        .await
        .unwrap();

    assert!(repo.find_user_id("hash-old").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_revoke_session(pool: PgPool) {
    create_user(&pool, "ada").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    let session = repo
        .create_session("ada", "phone", "hash-2", None)
        .await
        .unwrap();

    repo.revoke(session.id).await.unwrap();

    assert!(repo.find_user_id("hash-2").await.unwrap().is_none());
    assert!(repo.revoke(session.id).await.is_err());

    let listed = repo.list_sessions().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].revoked_at.is_some());
    assert!(repo.find_by_id(session.id).await.unwrap().is_some());
}
