//! Forum entity and repository trait.
//!
//! Maps to the `forums` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::domain::value_objects::UserFilter;
use crate::shared::error::AppError;

/// A forum owned by a user, holding threads.
///
/// Maps to the `forums` table:
/// - slug: TEXT PRIMARY KEY (unique case-insensitively)
/// - title: TEXT NOT NULL
/// - owner: TEXT NOT NULL REFERENCES users(nickname)
/// - threads: BIGINT NOT NULL DEFAULT 0
/// - posts: BIGINT NOT NULL DEFAULT 0
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Forum {
    /// Unique human-readable identifier
    pub slug: String,

    pub title: String,

    /// Owner nickname
    pub user: String,

    /// Number of threads created in this forum
    #[serde(default)]
    pub threads: i64,

    /// Number of posts created in this forum's threads
    #[serde(default)]
    pub posts: i64,
}

impl Forum {
    /// Build a new forum with zeroed counters.
    pub fn new(slug: impl Into<String>, title: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            user: user.into(),
            threads: 0,
            posts: 0,
        }
    }
}

/// Repository trait for Forum data access operations.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Insert a new forum.
    ///
    /// The owner nickname must resolve to an existing user
    /// (`AppError::OwnerNotFound`) and the slug must be unused
    /// (`AppError::Conflict`). The returned forum carries the owner's stored
    /// nickname.
    async fn create(&self, forum: &Forum) -> Result<Forum, AppError>;

    /// Find a forum by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Forum>, AppError>;

    /// Distinct users who authored a thread or post in the forum, ordered by
    /// nickname.
    async fn find_users(&self, slug: &str, filter: &UserFilter) -> Result<Vec<User>, AppError>;
}
