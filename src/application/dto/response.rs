//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::PostDetails;
use crate::domain::{Forum, Post, Thread, User};

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub nickname: String,
    pub fullname: String,
    pub about: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            nickname: user.nickname,
            fullname: user.fullname,
            about: user.about,
            email: user.email,
        }
    }
}

/// Forum response
#[derive(Debug, Serialize)]
pub struct ForumResponse {
    pub slug: String,
    pub title: String,
    pub user: String,
    pub threads: i64,
    pub posts: i64,
}

impl From<Forum> for ForumResponse {
    fn from(forum: Forum) -> Self {
        Self {
            slug: forum.slug,
            title: forum.title,
            user: forum.user,
            threads: forum.threads,
            posts: forum.posts,
        }
    }
}

/// Thread response
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    pub author: String,
    pub forum: String,
    pub message: String,
    pub votes: i32,
    pub created: DateTime<Utc>,
}

impl From<Thread> for ThreadResponse {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            slug: thread.slug,
            title: thread.title,
            author: thread.author,
            forum: thread.forum,
            message: thread.message,
            votes: thread.votes,
            created: thread.created,
        }
    }
}

/// Post response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    pub author: String,
    pub message: String,
    pub is_edited: bool,
    pub forum: String,
    pub thread: i64,
    pub created: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            parent: post.parent,
            author: post.author,
            message: post.message,
            is_edited: post.is_edited,
            forum: post.forum,
            thread: post.thread,
            created: post.created,
        }
    }
}

/// Post with related entities
#[derive(Debug, Serialize)]
pub struct PostDetailsResponse {
    pub post: PostResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<ForumResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<ThreadResponse>,
}

impl From<PostDetails> for PostDetailsResponse {
    fn from(details: PostDetails) -> Self {
        Self {
            post: details.post.into(),
            author: details.author.map(Into::into),
            forum: details.forum.map(Into::into),
            thread: details.thread.map(Into::into),
        }
    }
}
