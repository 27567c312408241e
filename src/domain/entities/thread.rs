//! Thread entity and repository trait.
//!
//! Maps to the `threads` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ThreadFilter, ThreadKey};
use crate::shared::error::AppError;

/// A discussion thread inside a forum.
///
/// Maps to the `threads` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - slug: TEXT NULL (unique case-insensitively when present)
/// - forum: TEXT NOT NULL REFERENCES forums(slug)
/// - author: TEXT NOT NULL REFERENCES users(nickname)
/// - title: TEXT NOT NULL
/// - message: TEXT NOT NULL
/// - votes: INTEGER NOT NULL DEFAULT 0
/// - created: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Store-assigned id (0 until inserted)
    pub id: i64,

    /// Optional unique slug
    pub slug: Option<String>,

    /// Slug of the owning forum
    pub forum: String,

    /// Author nickname
    pub author: String,

    pub title: String,

    pub message: String,

    /// Aggregated vote score
    #[serde(default)]
    pub votes: i32,

    pub created: DateTime<Utc>,
}

impl Thread {
    /// Normalize an incoming slug: blank slugs mean "no slug".
    pub fn normalize_slug(slug: Option<String>) -> Option<String> {
        slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

    /// Apply a partial edit. Returns true if any field changed.
    pub fn apply(&mut self, patch: &ThreadPatch) -> bool {
        let mut changed = false;

        if let Some(title) = &patch.title {
            if *title != self.title {
                self.title = title.clone();
                changed = true;
            }
        }
        if let Some(message) = &patch.message {
            if *message != self.message {
                self.message = message.clone();
                changed = true;
            }
        }

        changed
    }
}

/// Presence-aware edit of a thread's title and message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPatch {
    pub title: Option<String>,
    pub message: Option<String>,
}

impl ThreadPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.message.is_none()
    }
}

/// Repository trait for Thread data access operations.
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Insert a thread and bump its forum's thread counter in one transaction.
    ///
    /// Fails with `AppError::ForumNotFound`, `AppError::AuthorNotFound`, or
    /// `AppError::Conflict` on a duplicate slug. On failure no counter moves.
    /// The returned thread carries the stored forum slug and author nickname.
    async fn create(&self, thread: &Thread) -> Result<Thread, AppError>;

    /// Find a thread by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Thread>, AppError>;

    /// Find a thread by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Thread>, AppError>;

    /// Find a thread by slug or id.
    async fn find_by_key(&self, key: &ThreadKey) -> Result<Option<Thread>, AppError> {
        match key {
            ThreadKey::Id(id) => self.find_by_id(*id).await,
            ThreadKey::Slug(slug) => self.find_by_slug(slug).await,
        }
    }

    /// Threads of a forum ordered by creation time, bounded by the filter.
    async fn find_by_forum(&self, forum: &str, filter: &ThreadFilter) -> Result<Vec<Thread>, AppError>;

    /// Persist a thread's title and message.
    async fn update(&self, thread: &Thread) -> Result<Thread, AppError>;
}
