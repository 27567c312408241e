//! Post Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::application::dto::request::{PostDetailsQueryParams, UpdatePostRequest};
use crate::application::dto::response::{PostDetailsResponse, PostResponse};
use crate::application::services::{PostService, PostServiceImpl, Related};
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn parse_id(id: &str) -> Result<i64, AppError> {
    id.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid post id: {}", id)))
}

fn post_service(state: &AppState) -> impl PostService {
    PostServiceImpl::new(
        state.posts.clone(),
        state.users.clone(),
        state.forums.clone(),
        state.threads.clone(),
    )
}

/// Get a post, optionally with its author, forum and thread
pub async fn get_post_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PostDetailsQueryParams>,
) -> Result<Json<PostDetailsResponse>, AppError> {
    let related = params
        .related
        .as_deref()
        .map(Related::parse)
        .unwrap_or_default();

    let details = post_service(&state)
        .get_post_details(parse_id(&id)?, related)
        .await?;

    Ok(Json(details.into()))
}

/// Edit the message of a post
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = post_service(&state)
        .update_post(parse_id(&id)?, body.message)
        .await?;

    Ok(Json(post.into()))
}
