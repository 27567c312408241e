//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use tower::ServiceExt;

use forum_server::infrastructure::memory::InMemoryStore;
use forum_server::presentation::http::create_router;
use forum_server::startup::AppState;

/// Test application over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            router: create_router(AppState::in_memory(InMemoryStore::new())),
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string()).await
    }

    /// Make a POST request with an arbitrary body
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, nickname: &str, email: &str) -> Value {
        let (status, body) = self
            .post_json(
                &format!("/api/user/{}/create", nickname),
                json!({
                    "email": email,
                    "fullname": Name().fake::<String>(),
                    "about": "",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user {}: {}", nickname, body);
        body
    }

    /// Create a forum owned by `owner`
    pub async fn create_forum(&self, slug: &str, owner: &str) -> Value {
        let (status, body) = self
            .post_json(
                "/api/forum/create",
                json!({ "slug": slug, "title": format!("{} forum", slug), "user": owner }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create forum {}: {}", slug, body);
        body
    }

    /// Create a thread and return the response body
    pub async fn create_thread(&self, forum: &str, author: &str, slug: Option<&str>) -> Value {
        let mut request = json!({ "title": "A thread", "author": author, "message": "Hello" });
        if let Some(slug) = slug {
            request["slug"] = json!(slug);
        }
        let (status, body) = self
            .post_json(&format!("/api/forum/{}/create", forum), request)
            .await;
        assert_eq!(status, StatusCode::CREATED, "create thread: {}", body);
        body
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

static EMAIL_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Generate a random test email, unique within the test run
pub fn unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}{}", EMAIL_SEQ.fetch_add(1, Ordering::Relaxed), email)
}
