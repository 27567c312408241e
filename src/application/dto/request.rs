//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::application::services::{CreateForumDto, CreateThreadDto};
use crate::domain::{NewPost, ThreadFilter, ThreadPatch, UserFilter, UserPatch};
use crate::shared::validation::{validate_nickname, validate_slug, validate_thread_slug};

/// Create user request (nickname comes from the path)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub fullname: String,

    #[serde(default)]
    pub about: String,
}

/// Update profile request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub fullname: Option<String>,

    pub about: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            fullname: req.fullname,
            email: req.email,
            about: req.about,
        }
    }
}

/// Create forum request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateForumRequest {
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Owner nickname
    #[validate(custom(function = "validate_nickname"))]
    pub user: String,
}

impl From<CreateForumRequest> for CreateForumDto {
    fn from(req: CreateForumRequest) -> Self {
        Self {
            slug: req.slug,
            title: req.title,
            user: req.user,
        }
    }
}

/// Create thread request (forum comes from the path)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateThreadRequest {
    #[validate(custom(function = "validate_thread_slug"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[validate(custom(function = "validate_nickname"))]
    pub author: String,

    pub message: String,

    pub created: Option<DateTime<Utc>>,
}

impl From<CreateThreadRequest> for CreateThreadDto {
    fn from(req: CreateThreadRequest) -> Self {
        Self {
            slug: req.slug,
            title: req.title,
            author: req.author,
            message: req.message,
            created: req.created,
        }
    }
}

/// Update thread request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateThreadRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    pub message: Option<String>,
}

impl From<UpdateThreadRequest> for ThreadPatch {
    fn from(req: UpdateThreadRequest) -> Self {
        Self {
            title: req.title,
            message: req.message,
        }
    }
}

/// One post of a create-posts batch
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Parent post id; 0 or absent means a root post
    #[serde(default)]
    pub parent: Option<i64>,

    #[validate(custom(function = "validate_nickname"))]
    pub author: String,

    pub message: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            parent: req.parent.filter(|&id| id != 0),
            author: req.author,
            message: req.message,
        }
    }
}

/// Create posts request: a JSON array of posts
#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct CreatePostsRequest {
    #[validate(nested)]
    pub posts: Vec<CreatePostRequest>,
}

/// Update post request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub message: Option<String>,
}

/// Forum threads query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ThreadsQueryParams {
    pub limit: Option<u32>,
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub desc: bool,
}

impl From<ThreadsQueryParams> for ThreadFilter {
    fn from(params: ThreadsQueryParams) -> Self {
        Self {
            since: params.since,
            limit: params.limit,
            desc: params.desc,
        }
    }
}

/// Forum users query parameters
#[derive(Debug, Default, Deserialize)]
pub struct UsersQueryParams {
    pub limit: Option<u32>,
    pub since: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

impl From<UsersQueryParams> for UserFilter {
    fn from(params: UsersQueryParams) -> Self {
        Self {
            since: params.since,
            limit: params.limit,
            desc: params.desc,
        }
    }
}

/// Post details query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PostDetailsQueryParams {
    /// Comma-separated list of `user`, `forum`, `thread`
    pub related: Option<String>,
}
