//! Thread Service
//!
//! Thread lookup by slug or id, thread edits, and batch post creation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewPost, Post, PostRepository, Thread, ThreadKey, ThreadPatch, ThreadRepository};
use crate::shared::error::AppError;

/// Thread service trait
#[async_trait]
pub trait ThreadService: Send + Sync {
    /// Get thread by slug or id
    async fn get_thread(&self, key: &ThreadKey) -> Result<Thread, AppError>;

    /// Change the title and/or message of a thread
    async fn update_thread(&self, key: &ThreadKey, patch: ThreadPatch) -> Result<Thread, AppError>;

    /// Add a batch of posts to a thread, all-or-nothing
    async fn create_posts(&self, key: &ThreadKey, posts: Vec<NewPost>) -> Result<Vec<Post>, AppError>;
}

/// ThreadService implementation
pub struct ThreadServiceImpl<T, P>
where
    T: ThreadRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    thread_repo: Arc<T>,
    post_repo: Arc<P>,
}

impl<T, P> ThreadServiceImpl<T, P>
where
    T: ThreadRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub fn new(thread_repo: Arc<T>, post_repo: Arc<P>) -> Self {
        Self {
            thread_repo,
            post_repo,
        }
    }
}

#[async_trait]
impl<T, P> ThreadService for ThreadServiceImpl<T, P>
where
    T: ThreadRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    async fn get_thread(&self, key: &ThreadKey) -> Result<Thread, AppError> {
        self.thread_repo
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find thread by slug or id: {}", key)))
    }

    async fn update_thread(&self, key: &ThreadKey, patch: ThreadPatch) -> Result<Thread, AppError> {
        let mut thread = self.get_thread(key).await?;

        if !thread.apply(&patch) {
            return Ok(thread);
        }

        let updated = self.thread_repo.update(&thread).await?;
        tracing::debug!(thread_id = updated.id, "Thread updated");

        Ok(updated)
    }

    async fn create_posts(&self, key: &ThreadKey, posts: Vec<NewPost>) -> Result<Vec<Post>, AppError> {
        let thread = self.get_thread(key).await?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        // Every post of a batch shares one creation time.
        let created = Utc::now();
        let stored = self.post_repo.create_batch(&thread, &posts, created).await?;
        tracing::info!(
            thread_id = thread.id,
            forum = %thread.forum,
            count = stored.len(),
            "Posts created"
        );

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Forum, ForumRepository, User, UserRepository};
    use crate::infrastructure::memory::InMemoryStore;
    use pretty_assertions::assert_eq;

    async fn setup() -> (InMemoryStore, ThreadServiceImpl<InMemoryStore, InMemoryStore>, Thread) {
        let store = InMemoryStore::new();
        for nickname in ["alice", "bob"] {
            UserRepository::create(
                &store,
                &User {
                    nickname: nickname.into(),
                    email: format!("{}@example.com", nickname),
                    fullname: nickname.into(),
                    about: String::new(),
                },
            )
            .await
            .unwrap();
        }
        ForumRepository::create(&store, &Forum::new("rust", "Rust", "alice"))
            .await
            .unwrap();
        let thread = ThreadRepository::create(
            &store,
            &Thread {
                id: 0,
                slug: Some("ownership".into()),
                forum: "rust".into(),
                author: "alice".into(),
                title: "Ownership".into(),
                message: "Who owns what?".into(),
                votes: 0,
                created: Utc::now(),
            },
        )
        .await
        .unwrap();

        let service = ThreadServiceImpl::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (store, service, thread)
    }

    fn new_post(parent: Option<i64>, author: &str, message: &str) -> NewPost {
        NewPost {
            parent,
            author: author.into(),
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn test_get_thread_by_slug_and_id() {
        let (_, service, thread) = setup().await;

        let by_slug = service.get_thread(&ThreadKey::parse("OWNERSHIP")).await.unwrap();
        let by_id = service.get_thread(&ThreadKey::Id(thread.id)).await.unwrap();

        assert_eq!(by_slug, thread);
        assert_eq!(by_id, thread);
    }

    #[tokio::test]
    async fn test_get_unknown_thread_is_not_found() {
        let (_, service, _) = setup().await;
        let err = service.get_thread(&ThreadKey::Id(999)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_thread_changes_only_given_fields() {
        let (_, service, thread) = setup().await;

        let updated = service
            .update_thread(
                &ThreadKey::Id(thread.id),
                ThreadPatch {
                    title: Some("Borrowing".into()),
                    message: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Borrowing");
        assert_eq!(updated.message, thread.message);
    }

    #[tokio::test]
    async fn test_empty_thread_patch_returns_current() {
        let (_, service, thread) = setup().await;
        let updated = service
            .update_thread(&ThreadKey::parse("ownership"), ThreadPatch::default())
            .await
            .unwrap();
        assert_eq!(updated, thread);
    }

    #[tokio::test]
    async fn test_create_posts_share_timestamp_and_thread() {
        let (store, service, thread) = setup().await;

        let posts = service
            .create_posts(
                &ThreadKey::parse("ownership"),
                vec![new_post(None, "bob", "first"), new_post(None, "ALICE", "second")],
            )
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].created, posts[1].created);
        assert!(posts.iter().all(|p| p.thread == thread.id && p.forum == "rust"));
        assert_eq!(posts[1].author, "alice");
        assert!(posts[0].id < posts[1].id);

        let forum = ForumRepository::find_by_slug(&store, "rust").await.unwrap().unwrap();
        assert_eq!(forum.posts, 2);
    }

    #[tokio::test]
    async fn test_reply_to_post_in_same_thread() {
        let (_, service, thread) = setup().await;
        let key = ThreadKey::Id(thread.id);
        let root = service
            .create_posts(&key, vec![new_post(None, "bob", "root")])
            .await
            .unwrap();

        let reply = service
            .create_posts(&key, vec![new_post(Some(root[0].id), "alice", "reply")])
            .await
            .unwrap();

        assert_eq!(reply[0].parent, Some(root[0].id));
    }

    #[tokio::test]
    async fn test_parent_from_other_thread_rejects_whole_batch() {
        let (store, service, thread) = setup().await;
        let other = ThreadRepository::create(
            &store,
            &Thread {
                id: 0,
                slug: None,
                created: Utc::now(),
                ..thread.clone()
            },
        )
        .await
        .unwrap();
        let foreign = service
            .create_posts(&ThreadKey::Id(other.id), vec![new_post(None, "bob", "elsewhere")])
            .await
            .unwrap();

        let err = service
            .create_posts(
                &ThreadKey::Id(thread.id),
                vec![
                    new_post(None, "bob", "fine"),
                    new_post(Some(foreign[0].id), "bob", "bad parent"),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidParent(_)));
        let forum = ForumRepository::find_by_slug(&store, "rust").await.unwrap().unwrap();
        assert_eq!(forum.posts, 1);
    }

    #[tokio::test]
    async fn test_unknown_author_rejects_batch() {
        let (_, service, thread) = setup().await;
        let err = service
            .create_posts(&ThreadKey::Id(thread.id), vec![new_post(None, "ghost", "boo")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthorNotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_batch_requires_existing_thread() {
        let (_, service, thread) = setup().await;

        let posts = service
            .create_posts(&ThreadKey::Id(thread.id), Vec::new())
            .await
            .unwrap();
        assert!(posts.is_empty());

        let err = service
            .create_posts(&ThreadKey::parse("missing"), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
