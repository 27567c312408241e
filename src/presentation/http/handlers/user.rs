//! User Handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use super::creation_response;
use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::UserResponse;
use crate::application::services::{UserService, UserServiceImpl};
use crate::domain::User;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::shared::validation::{invalid_field, validate_nickname};
use crate::startup::AppState;

/// Register a user under the nickname in the path
pub async fn create_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<Response, AppError> {
    validate_nickname(&nickname).map_err(|e| invalid_field("nickname", e))?;

    let user_service = UserServiceImpl::new(state.users.clone());

    let outcome = user_service
        .register(User {
            nickname,
            email: body.email,
            fullname: body.fullname,
            about: body.about,
        })
        .await?;

    Ok(creation_response(outcome.map(UserResponse::from, |existing| {
        existing.into_iter().map(UserResponse::from).collect::<Vec<_>>()
    })))
}

/// Get a user profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_service = UserServiceImpl::new(state.users.clone());

    let user = user_service.get_profile(&nickname).await?;

    Ok(Json(user.into()))
}

/// Update the present fields of a user profile
pub async fn update_profile(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user_service = UserServiceImpl::new(state.users.clone());

    let user = user_service.update_profile(&nickname, body.into()).await?;

    Ok(Json(user.into()))
}
