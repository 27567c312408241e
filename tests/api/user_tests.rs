//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_create_user_returns_created_profile() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/user/alice/create",
            json!({ "email": "a@x.com", "fullname": "Alice", "about": "A" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "nickname": "alice", "fullname": "Alice", "about": "A", "email": "a@x.com" })
    );
}

#[tokio::test]
async fn test_registration_conflicts_report_existing_users() {
    let app = TestApp::new();
    let register = |nickname: &str, email: &str, about: &str| {
        let uri = format!("/api/user/{}/create", nickname);
        let body = json!({ "email": email, "fullname": "Someone", "about": about });
        let app = &app;
        async move { app.post_json(&uri, body).await }
    };

    let (status, _) = register("alice", "a@x.com", "A").await;
    assert_eq!(status, StatusCode::CREATED);

    // Same nickname in another case, new email.
    let (status, body) = register("ALICE", "b@y.com", "B").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["nickname"], "alice");

    // New nickname, existing email.
    let (status, body) = register("bob", "A@X.COM", "C").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body[0]["email"], "a@x.com");

    let (status, _) = register("bob", "b@y.com", "C").await;
    assert_eq!(status, StatusCode::CREATED);

    // Nickname of one user, email of another: both are reported.
    let (status, body) = register("alice", "b@y.com", "D").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let nicknames: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["nickname"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(nicknames, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_get_profile_is_case_insensitive() {
    let app = TestApp::new();
    app.create_user("Alice", &unique_email()).await;

    let (status, body) = app.get("/api/user/aLiCe/profile").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "Alice");
}

#[tokio::test]
async fn test_get_unknown_profile_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/user/ghost/profile").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_update_profile_applies_only_present_fields() {
    let app = TestApp::new();
    app.post_json(
        "/api/user/alice/create",
        json!({ "email": "a@x.com", "fullname": "Alice", "about": "old" }),
    )
    .await;

    let (status, body) = app
        .post_json("/api/user/alice/profile", json!({ "fullname": "Alice L." }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullname"], "Alice L.");
    assert_eq!(body["about"], "old");
    assert_eq!(body["email"], "a@x.com");

    let (status, body) = app
        .post_json("/api/user/alice/profile", json!({ "about": "" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["about"], "");

    let (_, body) = app.get("/api/user/alice/profile").await;
    assert_eq!(body["about"], "");
}

#[tokio::test]
async fn test_update_profile_with_taken_email_is_conflict() {
    let app = TestApp::new();
    app.create_user("alice", "a@x.com").await;
    app.create_user("bob", "b@y.com").await;

    let (status, _) = app
        .post_json("/api/user/alice/profile", json!({ "email": "B@Y.com" }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_unknown_profile_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json("/api/user/ghost/profile", json!({ "about": "x" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected() {
    let app = TestApp::new();

    let (status, _) = app.post_raw("/api/user/alice/create", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post_json(
            "/api/user/alice/create",
            json!({ "email": "not-an-email", "fullname": "Alice" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("email"));

    let (status, _) = app
        .post_json(
            "/api/user/bad%20name/create",
            json!({ "email": "a@x.com", "fullname": "Alice" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
