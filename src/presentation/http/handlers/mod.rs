//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::Creation;

pub mod forum;
pub mod health;
pub mod post;
pub mod thread;
pub mod user;

/// 201 with the created body, or 409 with the conflicting record(s).
pub(crate) fn creation_response<T, C>(outcome: Creation<T, C>) -> Response
where
    T: Serialize,
    C: Serialize,
{
    match outcome {
        Creation::Created(body) => (StatusCode::CREATED, Json(body)).into_response(),
        Creation::Conflict(existing) => (StatusCode::CONFLICT, Json(existing)).into_response(),
    }
}
