//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Thread;
use crate::shared::error::AppError;

/// A message posted in a thread.
///
/// Maps to the `posts` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - parent: BIGINT NULL REFERENCES posts(id) -- same thread only
/// - author: TEXT NOT NULL REFERENCES users(nickname)
/// - message: TEXT NOT NULL
/// - is_edited: BOOLEAN NOT NULL DEFAULT FALSE
/// - forum: TEXT NOT NULL REFERENCES forums(slug)
/// - thread: BIGINT NOT NULL REFERENCES threads(id)
/// - created: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,

    /// Parent post in the same thread; `None` for a root post
    pub parent: Option<i64>,

    /// Author nickname
    pub author: String,

    pub message: String,

    /// Set the first time the message actually changes, never cleared
    pub is_edited: bool,

    /// Slug of the forum the thread belongs to
    pub forum: String,

    /// Owning thread id
    pub thread: i64,

    pub created: DateTime<Utc>,
}

impl Post {
    /// Replace the message.
    ///
    /// An empty message or one equal to the stored message is a no-op.
    /// Otherwise the message is replaced and the post is marked edited.
    /// Returns true if the message changed.
    pub fn edit(&mut self, message: &str) -> bool {
        if message.is_empty() || message == self.message {
            return false;
        }
        self.message = message.to_string();
        self.is_edited = true;
        true
    }
}

/// A post submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub parent: Option<i64>,
    pub author: String,
    pub message: String,
}

impl NewPost {
    /// Materialize a post for `thread` with the given id and batch timestamp.
    pub fn into_post(self, id: i64, thread: &Thread, author: String, created: DateTime<Utc>) -> Post {
        Post {
            id,
            parent: self.parent,
            author,
            message: self.message,
            is_edited: false,
            forum: thread.forum.clone(),
            thread: thread.id,
            created,
        }
    }
}

/// Repository trait for Post data access operations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a batch of posts into a thread in one transaction.
    ///
    /// Every author must exist (`AppError::AuthorNotFound`) and every parent
    /// must be a post of the same thread (`AppError::InvalidParent`). All
    /// posts share `created`. The forum's post counter and its user index
    /// are updated in the same transaction.
    async fn create_batch(
        &self,
        thread: &Thread,
        posts: &[NewPost],
        created: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Apply `Post::edit` semantics to the stored post atomically.
    ///
    /// Fails with `AppError::NotFound` when the post does not exist.
    async fn update_message(&self, id: i64, message: &str) -> Result<Post, AppError>;
}
