//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    routing::post,
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{create_trace_layer, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(create_trace_layer())
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user_routes())
        .nest("/forum", forum_routes())
        .nest("/thread", thread_routes())
        .nest("/post", post_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/{nickname}/create", post(handlers::user::create_user))
        .route(
            "/{nickname}/profile",
            get(handlers::user::get_profile).post(handlers::user::update_profile),
        )
}

/// Forum routes
fn forum_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(handlers::forum::create_forum))
        .route("/{slug}/details", get(handlers::forum::get_forum))
        .route("/{slug}/create", post(handlers::forum::create_thread))
        .route("/{slug}/threads", get(handlers::forum::get_threads))
        .route("/{slug}/users", get(handlers::forum::get_users))
}

/// Thread routes, keyed by slug or id
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug_or_id}/create", post(handlers::thread::create_posts))
        .route(
            "/{slug_or_id}/details",
            get(handlers::thread::get_thread).post(handlers::thread::update_thread),
        )
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new().route(
        "/{id}/details",
        get(handlers::post::get_post_details).post(handlers::post::update_post),
    )
}
