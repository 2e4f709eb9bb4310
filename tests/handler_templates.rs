mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use std::sync::atomic::Ordering;

// ─── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_templates_require_session() {
    let ctx = common::create_test_context();
    let server = common::api_server(&ctx);

    let response = server.get("/api/templates").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({"success": false, "error": "Authentication required"}));

    server
        .post("/api/templates")
        .json(&json!({"name": "X", "role": "Backend", "experienceLevel": "Senior"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .delete("/api/templates")
        .add_query_param("id", "1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert!(ctx.templates.all().is_empty());
}

#[tokio::test]
async fn test_invalid_token_does_not_mutate() {
    let ctx = common::create_test_context();
    ctx.templates.insert_at("alice", "Keep me", Utc::now());
    let server = common::api_server(&ctx);

    server
        .delete("/api/templates")
        .add_query_param("id", "1")
        .authorization_bearer("not-a-session")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(ctx.templates.all().len(), 1);
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    server
        .get("/api/templates")
        .add_header("Cookie", format!("theme=dark; session_token={token}"))
        .await
        .assert_status_ok();
}

// ─── POST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_template_defaults_description() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    let response = server
        .post("/api/templates")
        .authorization_bearer(&token)
        .json(&json!({"name": "X", "role": "Backend", "experienceLevel": "Senior"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["template"]["name"], "X");
    assert_eq!(body["template"]["role"], "Backend");
    assert_eq!(body["template"]["experienceLevel"], "Senior");
    assert_eq!(body["template"]["description"], "");
    assert_eq!(body["template"]["userId"], "alice");
}

#[tokio::test]
async fn test_create_template_missing_role() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    let response = server
        .post("/api/templates")
        .authorization_bearer(&token)
        .json(&json!({"name": "X", "experienceLevel": "Senior"}))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "success": false,
        "error": "Name, role, and experience level are required"
    }));
    assert!(ctx.templates.all().is_empty());
}

#[tokio::test]
async fn test_create_template_empty_name_counts_as_missing() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    server
        .post("/api/templates")
        .authorization_bearer(&token)
        .json(&json!({"name": "", "role": "Backend", "experienceLevel": "Senior"}))
        .await
        .assert_status_bad_request();

    assert!(ctx.templates.all().is_empty());
}

#[tokio::test]
async fn test_create_template_malformed_body() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    let response = server
        .post("/api/templates")
        .authorization_bearer(&token)
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "success": false,
        "error": "Failed to create template"
    }));
    assert!(ctx.templates.all().is_empty());
}

#[tokio::test]
async fn test_create_template_whitespace_name_is_present() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    let response = server
        .post("/api/templates")
        .authorization_bearer(&token)
        .json(&json!({"name": "   ", "role": "Backend", "experienceLevel": "Senior"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["template"]["name"], "   ");
    assert_eq!(ctx.templates.all().len(), 1);
}

#[tokio::test]
async fn test_create_template_store_failure_is_generic() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    ctx.templates.failing.store(true, Ordering::SeqCst);
    let server = common::api_server(&ctx);

    let response = server
        .post("/api/templates")
        .authorization_bearer(&token)
        .json(&json!({"name": "X", "role": "Backend", "experienceLevel": "Senior"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"success": false, "error": "Failed to create template"}));
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_templates_newest_first_and_scoped() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;

    let day = |d| Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap();
    ctx.templates.insert_at("alice", "middle", day(2));
    ctx.templates.insert_at("alice", "oldest", day(1));
    ctx.templates.insert_at("bob", "not mine", day(5));
    ctx.templates.insert_at("alice", "newest", day(3));

    let server = common::api_server(&ctx);
    let response = server
        .get("/api/templates")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let names: Vec<&str> = body["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_list_templates_store_failure_is_generic() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    ctx.templates.failing.store(true, Ordering::SeqCst);
    let server = common::api_server(&ctx);

    let response = server
        .get("/api/templates")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"success": false, "error": "Failed to fetch templates"}));
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_own_template() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let template = ctx.templates.insert_at("alice", "Mine", Utc::now());
    let server = common::api_server(&ctx);

    let response = server
        .delete("/api/templates")
        .add_query_param("id", template.id)
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"success": true}));
    assert!(ctx.templates.all().is_empty());
}

#[tokio::test]
async fn test_delete_other_users_template_is_not_honoured() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let template = ctx.templates.insert_at("bob", "Bob's", Utc::now());
    let server = common::api_server(&ctx);

    let response = server
        .delete("/api/templates")
        .add_query_param("id", template.id)
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"success": false, "error": "Failed to delete template"}));
    assert_eq!(ctx.templates.all(), vec![template]);
}

#[tokio::test]
async fn test_delete_requires_id() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    let server = common::api_server(&ctx);

    for request in [
        server.delete("/api/templates"),
        server.delete("/api/templates").add_query_param("id", ""),
    ] {
        let response = request.authorization_bearer(&token).await;
        response.assert_status_bad_request();
        response.assert_json(&json!({"success": false, "error": "Template ID is required"}));
    }
}

#[tokio::test]
async fn test_delete_non_numeric_id() {
    let ctx = common::create_test_context();
    let token = ctx.login("alice").await;
    ctx.templates.insert_at("alice", "Mine", Utc::now());
    let server = common::api_server(&ctx);

    server
        .delete("/api/templates")
        .add_query_param("id", "abc")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(ctx.templates.all().len(), 1);
}
