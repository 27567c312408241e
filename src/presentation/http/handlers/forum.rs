//! Forum Handlers

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use super::creation_response;
use crate::application::dto::request::{
    CreateForumRequest, CreateThreadRequest, ThreadsQueryParams, UsersQueryParams,
};
use crate::application::dto::response::{ForumResponse, ThreadResponse, UserResponse};
use crate::application::services::{ForumService, ForumServiceImpl};
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn forum_service(state: &AppState) -> impl ForumService {
    ForumServiceImpl::new(state.forums.clone(), state.threads.clone())
}

/// Create a forum
pub async fn create_forum(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateForumRequest>,
) -> Result<Response, AppError> {
    let outcome = forum_service(&state).create_forum(body.into()).await?;

    Ok(creation_response(outcome.map(ForumResponse::from, ForumResponse::from)))
}

/// Get forum details
pub async fn get_forum(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ForumResponse>, AppError> {
    let forum = forum_service(&state).get_forum(&slug).await?;

    Ok(Json(forum.into()))
}

/// Create a thread in a forum
pub async fn create_thread(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateThreadRequest>,
) -> Result<Response, AppError> {
    let outcome = forum_service(&state).create_thread(&slug, body.into()).await?;

    Ok(creation_response(outcome.map(ThreadResponse::from, ThreadResponse::from)))
}

/// List threads of a forum
pub async fn get_threads(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ThreadsQueryParams>,
) -> Result<Json<Vec<ThreadResponse>>, AppError> {
    let threads = forum_service(&state).get_threads(&slug, params.into()).await?;

    Ok(Json(threads.into_iter().map(ThreadResponse::from).collect()))
}

/// List users active in a forum
pub async fn get_users(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<UsersQueryParams>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = forum_service(&state).get_users(&slug, params.into()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
