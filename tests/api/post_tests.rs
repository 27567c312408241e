//! Post API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{unique_email, TestApp};

async fn app_with_post() -> (TestApp, Value) {
    let app = TestApp::new();
    app.create_user("alice", &unique_email()).await;
    app.create_forum("rust", "alice").await;
    app.create_thread("rust", "alice", Some("traits")).await;
    let (status, body) = app
        .post_json(
            "/api/thread/traits/create",
            json!([{ "author": "alice", "message": "original" }]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    (app, body[0].clone())
}

#[tokio::test]
async fn test_post_details_with_related() {
    let (app, post) = app_with_post().await;

    let (status, body) = app
        .get(&format!("/api/post/{}/details", post["id"]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "post": post }));

    let (status, body) = app
        .get(&format!("/api/post/{}/details?related=user,forum,thread", post["id"]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["nickname"], "alice");
    assert_eq!(body["forum"]["posts"], 1);
    assert_eq!(body["thread"]["slug"], "traits");
}

#[tokio::test]
async fn test_post_details_errors() {
    let (app, _) = app_with_post().await;

    let (status, _) = app.get("/api/post/9999/details").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/post/abc/details").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_post_sets_edited_once() {
    let (app, post) = app_with_post().await;
    let uri = format!("/api/post/{}/details", post["id"]);

    let (_, body) = app.post_json(&uri, json!({ "message": "original" })).await;
    assert_eq!(body["isEdited"], false);

    let (_, body) = app.post_json(&uri, json!({})).await;
    assert_eq!(body["isEdited"], false);
    assert_eq!(body["message"], "original");

    let (status, body) = app.post_json(&uri, json!({ "message": "changed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isEdited"], true);
    assert_eq!(body["message"], "changed");

    let (_, body) = app.post_json(&uri, json!({ "message": "changed" })).await;
    assert_eq!(body["isEdited"], true);
}

#[tokio::test]
async fn test_edit_unknown_post() {
    let (app, _) = app_with_post().await;

    let (status, _) = app
        .post_json("/api/post/9999/details", json!({ "message": "x" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
