use sqlx::PgPool;
use std::sync::Arc;
use interview_hub::domain::entities::NewTemplate;
use interview_hub::domain::repositories::TemplateRepository;
use interview_hub::infrastructure::persistence::PgTemplateRepository;

async fn create_user(pool: &PgPool, id: &str) {
    sqlx::query("INSERT INTO users (id) VALUES ($1)")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

fn new_template(user_id: &str, name: &str) -> NewTemplate {
    NewTemplate {
        user_id: user_id.to_string(),
        name: name.to_string(),
        role: "Backend".to_string(),
        experience_level: "Senior".to_string(),
        description: String::new(),
    }
}

#[sqlx::test]
async fn test_create_template(pool: PgPool) {
    create_user(&pool, "alice").await;
    let repo = PgTemplateRepository::new(Arc::new(pool));

    let template = repo.create(new_template("alice", "Loop")).await.unwrap();

    assert!(template.id > 0);
    assert_eq!(template.name, "Loop");
    assert_eq!(template.description, "");
    assert_eq!(template.user_id, "alice");
}

#[sqlx::test]
async fn test_list_by_user_newest_first(pool: PgPool) {
    create_user(&pool, "alice").await;
    create_user(&pool, "bob").await;

    sqlx::query(
        "INSERT INTO templates (name, role, experience_level, user_id, created_at) VALUES
         ('old', 'r', 'l', 'alice', NOW() - INTERVAL '2 days'),
         ('new', 'r', 'l', 'alice', NOW()),
         ('mid', 'r', 'l', 'alice', NOW() - INTERVAL '1 day'),
         ('bob', 'r', 'l', 'bob', NOW())",
    )
    .execute(&pool)
    .await
    .unwrap();

    let repo = PgTemplateRepository::new(Arc::new(pool));
    let names: Vec<String> = repo
        .list_by_user("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

    assert_eq!(names, vec!["new", "mid", "old"]);
}

#[sqlx::test]
async fn test_delete_is_scoped_to_owner(pool: PgPool) {
    create_user(&pool, "alice").await;
    create_user(&pool, "bob").await;
    let repo = PgTemplateRepository::new(Arc::new(pool));

    let template = repo.create(new_template("bob", "Bob's")).await.unwrap();

    assert!(!repo.delete(template.id, "alice").await.unwrap());
    assert_eq!(repo.list_by_user("bob").await.unwrap().len(), 1);

    assert!(repo.delete(template.id, "bob").await.unwrap());
    assert!(!repo.delete(template.id, "bob").await.unwrap());
}
