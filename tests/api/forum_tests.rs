//! Forum API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{unique_email, TestApp};

async fn app_with_users(nicknames: &[&str]) -> TestApp {
    let app = TestApp::new();
    for nickname in nicknames {
        app.create_user(nickname, &unique_email()).await;
    }
    app
}

#[tokio::test]
async fn test_create_forum_resolves_owner_case() {
    let app = app_with_users(&["Alice"]).await;

    let body = app.create_forum("rust", "alice").await;

    assert_eq!(
        body,
        json!({ "slug": "rust", "title": "rust forum", "user": "Alice", "threads": 0, "posts": 0 })
    );
}

#[tokio::test]
async fn test_duplicate_forum_returns_existing() {
    let app = app_with_users(&["alice", "bob"]).await;
    let original = app.create_forum("rust", "alice").await;

    let (status, body) = app
        .post_json(
            "/api/forum/create",
            json!({ "slug": "RUST", "title": "Other", "user": "bob" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, original);
}

#[tokio::test]
async fn test_create_forum_with_unknown_owner() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json(
            "/api/forum/create",
            json!({ "slug": "rust", "title": "Rust", "user": "ghost" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forum_details_and_not_found() {
    let app = app_with_users(&["alice"]).await;
    app.create_forum("rust", "alice").await;

    let (status, body) = app.get("/api/forum/Rust/details").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "rust");

    let (status, _) = app.get("/api/forum/missing/details").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_thread_and_conflict() {
    let app = app_with_users(&["alice", "bob"]).await;
    app.create_forum("rust", "alice").await;

    let thread = app.create_thread("rust", "bob", Some("intro")).await;
    assert_eq!(thread["forum"], "rust");
    assert_eq!(thread["slug"], "intro");
    assert!(thread["id"].as_i64().unwrap() > 0);

    let (status, body) = app
        .post_json(
            "/api/forum/rust/create",
            json!({ "slug": "INTRO", "title": "Again", "author": "alice", "message": "m" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, thread);

    let (_, forum) = app.get("/api/forum/rust/details").await;
    assert_eq!(forum["threads"], 1);
}

#[tokio::test]
async fn test_create_thread_missing_references() {
    let app = app_with_users(&["alice"]).await;
    app.create_forum("rust", "alice").await;

    let (status, _) = app
        .post_json(
            "/api/forum/missing/create",
            json!({ "title": "t", "author": "alice", "message": "m" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_json(
            "/api/forum/rust/create",
            json!({ "title": "t", "author": "ghost", "message": "m" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forum_threads_listing() {
    let app = app_with_users(&["alice"]).await;
    app.create_forum("rust", "alice").await;
    for (slug, created) in [
        ("t1", "2024-01-01T00:00:00Z"),
        ("t2", "2024-01-02T00:00:00Z"),
        ("t3", "2024-01-03T00:00:00Z"),
    ] {
        let (status, _) = app
            .post_json(
                "/api/forum/rust/create",
                json!({ "slug": slug, "title": "t", "author": "alice", "message": "m", "created": created }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let slugs = |body: serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|t| t["slug"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = app.get("/api/forum/rust/threads").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(body), vec!["t1", "t2", "t3"]);

    let (_, body) = app
        .get("/api/forum/rust/threads?since=2024-01-02T00:00:00Z&desc=true")
        .await;
    assert_eq!(slugs(body), vec!["t2", "t1"]);

    let (_, body) = app.get("/api/forum/rust/threads?limit=1&desc=true").await;
    assert_eq!(slugs(body), vec!["t3"]);

    let (status, _) = app.get("/api/forum/missing/threads").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forum_users_listing() {
    let app = app_with_users(&["owner", "Zed", "amy", "bob"]).await;
    app.create_forum("rust", "owner").await;
    let thread = app.create_thread("rust", "Zed", None).await;
    let (status, _) = app
        .post_json(
            &format!("/api/thread/{}/create", thread["id"]),
            json!([{ "author": "amy", "message": "hi" }, { "author": "bob", "message": "yo" }]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let nicknames = |body: serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|u| u["nickname"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = app.get("/api/forum/rust/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nicknames(body), vec!["amy", "bob", "Zed"]);

    let (_, body) = app.get("/api/forum/rust/users?since=amy&limit=1").await;
    assert_eq!(nicknames(body), vec!["bob"]);

    let (_, body) = app.get("/api/forum/rust/users?since=zed&desc=true").await;
    assert_eq!(nicknames(body), vec!["bob", "amy"]);
}
