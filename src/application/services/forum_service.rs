//! Forum Service
//!
//! Forum creation and lookup, thread creation inside a forum, and the
//! per-forum thread and user listings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Creation, Forum, ForumRepository, Thread, ThreadFilter, ThreadRepository, User, UserFilter,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Forum service trait
#[async_trait]
pub trait ForumService: Send + Sync {
    /// Create a forum; a slug collision reports the existing forum
    async fn create_forum(&self, request: CreateForumDto) -> Result<Creation<Forum>, AppError>;

    /// Get forum by slug
    async fn get_forum(&self, slug: &str) -> Result<Forum, AppError>;

    /// Create a thread in a forum; a slug collision reports the existing thread
    async fn create_thread(&self, forum: &str, request: CreateThreadDto) -> Result<Creation<Thread>, AppError>;

    /// Threads of a forum ordered by creation time
    async fn get_threads(&self, forum: &str, filter: ThreadFilter) -> Result<Vec<Thread>, AppError>;

    /// Users who authored a thread or post in a forum
    async fn get_users(&self, forum: &str, filter: UserFilter) -> Result<Vec<User>, AppError>;
}

/// Create forum request
#[derive(Debug, Clone)]
pub struct CreateForumDto {
    pub slug: String,
    pub title: String,
    /// Owner nickname, any case
    pub user: String,
}

/// Create thread request
#[derive(Debug, Clone)]
pub struct CreateThreadDto {
    pub slug: Option<String>,
    pub title: String,
    pub author: String,
    pub message: String,
    /// Defaults to the time of the request
    pub created: Option<DateTime<Utc>>,
}

/// ForumService implementation
pub struct ForumServiceImpl<F, T>
where
    F: ForumRepository + ?Sized,
    T: ThreadRepository + ?Sized,
{
    forum_repo: Arc<F>,
    thread_repo: Arc<T>,
}

impl<F, T> ForumServiceImpl<F, T>
where
    F: ForumRepository + ?Sized,
    T: ThreadRepository + ?Sized,
{
    pub fn new(forum_repo: Arc<F>, thread_repo: Arc<T>) -> Self {
        Self {
            forum_repo,
            thread_repo,
        }
    }

    async fn require_forum(&self, slug: &str) -> Result<Forum, AppError> {
        self.forum_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find forum with slug: {}", slug)))
    }
}

#[async_trait]
impl<F, T> ForumService for ForumServiceImpl<F, T>
where
    F: ForumRepository + ?Sized + 'static,
    T: ThreadRepository + ?Sized + 'static,
{
    async fn create_forum(&self, request: CreateForumDto) -> Result<Creation<Forum>, AppError> {
        let forum = Forum::new(request.slug, request.title, request.user);

        match self.forum_repo.create(&forum).await {
            Ok(created) => {
                tracing::info!(slug = %created.slug, owner = %created.user, "Forum created");
                Ok(Creation::Created(created))
            }
            Err(e) if e.is_conflict() => {
                metrics::record_create_conflict("forum");
                match self.forum_repo.find_by_slug(&forum.slug).await? {
                    Some(existing) => Ok(Creation::Conflict(existing)),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn get_forum(&self, slug: &str) -> Result<Forum, AppError> {
        self.require_forum(slug).await
    }

    async fn create_thread(&self, forum: &str, request: CreateThreadDto) -> Result<Creation<Thread>, AppError> {
        let thread = Thread {
            id: 0,
            slug: Thread::normalize_slug(request.slug),
            forum: forum.to_string(),
            author: request.author,
            title: request.title,
            message: request.message,
            votes: 0,
            created: request.created.unwrap_or_else(Utc::now),
        };

        match self.thread_repo.create(&thread).await {
            Ok(created) => {
                tracing::info!(
                    thread_id = created.id,
                    forum = %created.forum,
                    author = %created.author,
                    "Thread created"
                );
                Ok(Creation::Created(created))
            }
            Err(e) if e.is_conflict() => {
                metrics::record_create_conflict("thread");
                let existing = match thread.slug.as_deref() {
                    Some(slug) => self.thread_repo.find_by_slug(slug).await?,
                    None => None,
                };
                existing.map(Creation::Conflict).ok_or(e)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_threads(&self, forum: &str, filter: ThreadFilter) -> Result<Vec<Thread>, AppError> {
        let forum = self.require_forum(forum).await?;
        self.thread_repo.find_by_forum(&forum.slug, &filter).await
    }

    async fn get_users(&self, forum: &str, filter: UserFilter) -> Result<Vec<User>, AppError> {
        let forum = self.require_forum(forum).await?;
        self.forum_repo.find_users(&forum.slug, &filter).await
    }
}
