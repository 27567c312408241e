//! Thread Handlers
//!
//! Threads are addressed by slug or numeric id in the same path segment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreatePostsRequest, UpdateThreadRequest};
use crate::application::dto::response::{PostResponse, ThreadResponse};
use crate::application::services::{ThreadService, ThreadServiceImpl};
use crate::domain::{NewPost, ThreadKey};
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn thread_service(state: &AppState) -> impl ThreadService {
    ThreadServiceImpl::new(state.threads.clone(), state.posts.clone())
}

/// Create a batch of posts in a thread
pub async fn create_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreatePostsRequest>,
) -> Result<(StatusCode, Json<Vec<PostResponse>>), AppError> {
    let posts: Vec<NewPost> = body.posts.into_iter().map(NewPost::from).collect();

    let created = thread_service(&state)
        .create_posts(&ThreadKey::parse(&slug_or_id), posts)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(created.into_iter().map(PostResponse::from).collect()),
    ))
}

/// Get thread details
pub async fn get_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> Result<Json<ThreadResponse>, AppError> {
    let thread = thread_service(&state)
        .get_thread(&ThreadKey::parse(&slug_or_id))
        .await?;

    Ok(Json(thread.into()))
}

/// Update thread title and/or message
pub async fn update_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateThreadRequest>,
) -> Result<Json<ThreadResponse>, AppError> {
    let thread = thread_service(&state)
        .update_thread(&ThreadKey::parse(&slug_or_id), body.into())
        .await?;

    Ok(Json(thread.into()))
}
