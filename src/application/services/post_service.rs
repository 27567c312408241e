//! Post Service
//!
//! Post lookup, post details with related entities, and message edits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    Forum, ForumRepository, Post, PostRepository, Thread, ThreadKey, ThreadRepository, User,
    UserRepository,
};
use crate::shared::error::AppError;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Get post by id
    async fn get_post(&self, id: i64) -> Result<Post, AppError>;

    /// Get a post together with the requested related entities
    async fn get_post_details(&self, id: i64, related: Related) -> Result<PostDetails, AppError>;

    /// Replace the message of a post
    async fn update_post(&self, id: i64, message: Option<String>) -> Result<Post, AppError>;
}

/// Which related entities to attach to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Related {
    pub user: bool,
    pub forum: bool,
    pub thread: bool,
}

impl Related {
    /// Parse a comma-separated list such as `user,thread`. Unknown names are ignored.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .fold(Self::default(), |mut related, name| {
                match name {
                    "user" => related.user = true,
                    "forum" => related.forum = true,
                    "thread" => related.thread = true,
                    _ => {}
                }
                related
            })
    }
}

/// A post and its optionally attached related entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post: Post,
    pub author: Option<User>,
    pub forum: Option<Forum>,
    pub thread: Option<Thread>,
}

/// PostService implementation
pub struct PostServiceImpl<P, U, F, T>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
    F: ForumRepository + ?Sized,
    T: ThreadRepository + ?Sized,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
    forum_repo: Arc<F>,
    thread_repo: Arc<T>,
}

impl<P, U, F, T> PostServiceImpl<P, U, F, T>
where
    P: PostRepository + ?Sized,
    U: UserRepository + ?Sized,
    F: ForumRepository + ?Sized,
    T: ThreadRepository + ?Sized,
{
    pub fn new(post_repo: Arc<P>, user_repo: Arc<U>, forum_repo: Arc<F>, thread_repo: Arc<T>) -> Self {
        Self {
            post_repo,
            user_repo,
            forum_repo,
            thread_repo,
        }
    }
}

#[async_trait]
impl<P, U, F, T> PostService for PostServiceImpl<P, U, F, T>
where
    P: PostRepository + ?Sized + 'static,
    U: UserRepository + ?Sized + 'static,
    F: ForumRepository + ?Sized + 'static,
    T: ThreadRepository + ?Sized + 'static,
{
    async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        self.post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find post with id: {}", id)))
    }

    async fn get_post_details(&self, id: i64, related: Related) -> Result<PostDetails, AppError> {
        let post = self.get_post(id).await?;

        let author = if related.user {
            self.user_repo.find_by_nickname(&post.author).await?
        } else {
            None
        };
        let forum = if related.forum {
            self.forum_repo.find_by_slug(&post.forum).await?
        } else {
            None
        };
        let thread = if related.thread {
            self.thread_repo.find_by_key(&ThreadKey::Id(post.thread)).await?
        } else {
            None
        };

        Ok(PostDetails {
            post,
            author,
            forum,
            thread,
        })
    }

    async fn update_post(&self, id: i64, message: Option<String>) -> Result<Post, AppError> {
        match message.filter(|m| !m.is_empty()) {
            Some(message) => {
                let post = self.post_repo.update_message(id, &message).await?;
                tracing::debug!(post_id = post.id, edited = post.is_edited, "Post updated");
                Ok(post)
            }
            None => self.get_post(id).await,
        }
    }
}
