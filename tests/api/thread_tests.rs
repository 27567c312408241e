//! Thread API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{unique_email, TestApp};

async fn app_with_thread() -> (TestApp, Value) {
    let app = TestApp::new();
    app.create_user("alice", &unique_email()).await;
    app.create_user("bob", &unique_email()).await;
    app.create_forum("rust", "alice").await;
    let thread = app.create_thread("rust", "alice", Some("ownership")).await;
    (app, thread)
}

#[tokio::test]
async fn test_thread_details_by_slug_or_id() {
    let (app, thread) = app_with_thread().await;

    let (status, by_slug) = app.get("/api/thread/OWNERSHIP/details").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug, thread);

    let (status, by_id) = app
        .get(&format!("/api/thread/{}/details", thread["id"]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, thread);

    let (status, _) = app.get("/api/thread/9999/details").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_thread() {
    let (app, thread) = app_with_thread().await;

    let (status, body) = app
        .post_json(
            "/api/thread/ownership/details",
            json!({ "message": "Borrowing rules" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Borrowing rules");
    assert_eq!(body["title"], thread["title"]);

    let (status, _) = app
        .post_json("/api/thread/missing/details", json!({ "title": "x" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_posts_batch() {
    let (app, thread) = app_with_thread().await;

    let (status, body) = app
        .post_json(
            "/api/thread/ownership/create",
            json!([
                { "author": "bob", "message": "first" },
                { "author": "ALICE", "message": "second" }
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["created"], posts[1]["created"]);
    assert_eq!(posts[1]["author"], "alice");
    assert_eq!(posts[0]["thread"], thread["id"]);
    assert_eq!(posts[0]["forum"], "rust");
    assert_eq!(posts[0]["isEdited"], false);

    let (_, forum) = app.get("/api/forum/rust/details").await;
    assert_eq!(forum["posts"], 2);
}

#[tokio::test]
async fn test_empty_batch() {
    let (app, _) = app_with_thread().await;

    let (status, body) = app.post_json("/api/thread/ownership/create", json!([])).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!([]));

    let (status, _) = app.post_json("/api/thread/missing/create", json!([])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reply_must_stay_in_thread() {
    let (app, _) = app_with_thread().await;
    let other = app.create_thread("rust", "bob", Some("lifetimes")).await;

    let (_, body) = app
        .post_json(
            &format!("/api/thread/{}/create", other["id"]),
            json!([{ "author": "bob", "message": "elsewhere" }]),
        )
        .await;
    let foreign_id = body[0]["id"].clone();

    let (status, _) = app
        .post_json(
            "/api/thread/ownership/create",
            json!([
                { "author": "alice", "message": "ok" },
                { "author": "alice", "message": "bad", "parent": foreign_id }
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Nothing from the rejected batch was stored.
    let (_, forum) = app.get("/api/forum/rust/details").await;
    assert_eq!(forum["posts"], 1);

    let (status, body) = app
        .post_json(
            "/api/thread/lifetimes/create",
            json!([{ "author": "alice", "message": "reply", "parent": foreign_id }]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body[0]["parent"], foreign_id);
}

#[tokio::test]
async fn test_post_with_unknown_author() {
    let (app, _) = app_with_thread().await;

    let (status, _) = app
        .post_json(
            "/api/thread/ownership/create",
            json!([{ "author": "ghost", "message": "boo" }]),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
