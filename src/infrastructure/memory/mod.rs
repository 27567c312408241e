//! In-Memory Store
//!
//! A process-local implementation of every repository trait, backed by a
//! single `RwLock`-guarded state. Each operation takes the lock once, so every
//! cross-entity write (insert plus counter bump plus forum-user index) is
//! atomic with respect to concurrent callers.
//!
//! Used by the `memory` storage backend and by tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{
    fold_key, Forum, ForumRepository, NewPost, Post, PostRepository, Thread, ThreadFilter,
    ThreadRepository, User, UserFilter, UserRepository,
};
use crate::shared::error::AppError;

/// Folded-key indexes over all entities.
#[derive(Debug, Default)]
struct State {
    /// nickname key -> user
    users: BTreeMap<String, User>,
    /// email key -> nickname key
    emails: HashMap<String, String>,
    /// slug key -> forum
    forums: HashMap<String, Forum>,
    threads: BTreeMap<i64, Thread>,
    /// slug key -> thread id
    thread_slugs: HashMap<String, i64>,
    posts: BTreeMap<i64, Post>,
    /// forum slug key -> nickname keys of thread and post authors
    forum_users: HashMap<String, BTreeSet<String>>,
    last_thread_id: i64,
    last_post_id: i64,
}

impl State {
    fn user(&self, nickname: &str) -> Option<&User> {
        self.users.get(&fold_key(nickname))
    }

    fn record_forum_user(&mut self, forum: &str, nickname: &str) {
        self.forum_users
            .entry(fold_key(forum))
            .or_default()
            .insert(fold_key(nickname));
    }
}

/// Shared in-memory store. Cloning yields another handle to the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, AppError> {
        Ok(self.state.read().user(nickname).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read();
        Ok(state
            .emails
            .get(&fold_key(email))
            .and_then(|nickname_key| state.users.get(nickname_key))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.state.write();
        let nickname_key = fold_key(&user.nickname);
        let email_key = fold_key(&user.email);

        if state.users.contains_key(&nickname_key) || state.emails.contains_key(&email_key) {
            return Err(AppError::Conflict(
                "User with this nickname or email already exists".to_string(),
            ));
        }

        state.emails.insert(email_key, nickname_key.clone());
        state.users.insert(nickname_key, user.clone());
        Ok(user.clone())
    }

    async fn update_profile(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.state.write();
        let nickname_key = fold_key(&user.nickname);
        let new_email_key = fold_key(&user.email);

        let old_email_key = match state.users.get(&nickname_key) {
            Some(existing) => fold_key(&existing.email),
            None => {
                return Err(AppError::NotFound(format!(
                    "User with nickname {} not found",
                    user.nickname
                )))
            }
        };

        if let Some(owner) = state.emails.get(&new_email_key) {
            if *owner != nickname_key {
                return Err(AppError::Conflict(format!(
                    "Email {} is already registered",
                    user.email
                )));
            }
        }

        state.emails.remove(&old_email_key);
        state.emails.insert(new_email_key, nickname_key.clone());

        let stored = state
            .users
            .get_mut(&nickname_key)
            .ok_or_else(|| AppError::Internal("user index out of sync".into()))?;
        stored.fullname = user.fullname.clone();
        stored.email = user.email.clone();
        stored.about = user.about.clone();
        Ok(stored.clone())
    }
}

#[async_trait]
impl ForumRepository for InMemoryStore {
    async fn create(&self, forum: &Forum) -> Result<Forum, AppError> {
        let mut state = self.state.write();

        let owner = state
            .user(&forum.user)
            .map(|u| u.nickname.clone())
            .ok_or_else(|| AppError::OwnerNotFound(forum.user.clone()))?;

        let slug_key = fold_key(&forum.slug);
        if state.forums.contains_key(&slug_key) {
            return Err(AppError::Conflict(format!("Forum {} already exists", forum.slug)));
        }

        let stored = Forum::new(forum.slug.clone(), forum.title.clone(), owner);
        state.forums.insert(slug_key, stored.clone());
        Ok(stored)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Forum>, AppError> {
        Ok(self.state.read().forums.get(&fold_key(slug)).cloned())
    }

    async fn find_users(&self, slug: &str, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        let state = self.state.read();
        let Some(keys) = state.forum_users.get(&fold_key(slug)) else {
            return Ok(Vec::new());
        };

        let limit = filter.effective_limit() as usize;
        let admitted = keys.iter().filter(|key| filter.admits(key));
        let ordered: Box<dyn Iterator<Item = &String>> = if filter.desc {
            Box::new(admitted.rev())
        } else {
            Box::new(admitted)
        };

        Ok(ordered
            .filter_map(|key| state.users.get(key))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ThreadRepository for InMemoryStore {
    async fn create(&self, thread: &Thread) -> Result<Thread, AppError> {
        let mut state = self.state.write();

        let forum_key = fold_key(&thread.forum);
        let forum_slug = state
            .forums
            .get(&forum_key)
            .map(|f| f.slug.clone())
            .ok_or_else(|| AppError::ForumNotFound(thread.forum.clone()))?;
        let author = state
            .user(&thread.author)
            .map(|u| u.nickname.clone())
            .ok_or_else(|| AppError::AuthorNotFound(thread.author.clone()))?;

        let slug = Thread::normalize_slug(thread.slug.clone());
        if let Some(slug) = &slug {
            if state.thread_slugs.contains_key(&fold_key(slug)) {
                return Err(AppError::Conflict(format!("Thread {} already exists", slug)));
            }
        }

        state.last_thread_id += 1;
        let stored = Thread {
            id: state.last_thread_id,
            slug,
            forum: forum_slug,
            author,
            ..thread.clone()
        };

        if let Some(slug) = &stored.slug {
            state.thread_slugs.insert(fold_key(slug), stored.id);
        }
        state.threads.insert(stored.id, stored.clone());
        if let Some(forum) = state.forums.get_mut(&forum_key) {
            forum.threads += 1;
        }
        state.record_forum_user(&stored.forum, &stored.author);

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Thread>, AppError> {
        Ok(self.state.read().threads.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Thread>, AppError> {
        let state = self.state.read();
        Ok(state
            .thread_slugs
            .get(&fold_key(slug))
            .and_then(|id| state.threads.get(id))
            .cloned())
    }

    async fn find_by_forum(&self, forum: &str, filter: &ThreadFilter) -> Result<Vec<Thread>, AppError> {
        let state = self.state.read();
        let forum_key = fold_key(forum);

        let mut threads: Vec<Thread> = state
            .threads
            .values()
            .filter(|t| fold_key(&t.forum) == forum_key && filter.admits(&t.created))
            .cloned()
            .collect();

        threads.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        if filter.desc {
            threads.reverse();
        }
        threads.truncate(filter.effective_limit() as usize);

        Ok(threads)
    }

    async fn update(&self, thread: &Thread) -> Result<Thread, AppError> {
        let mut state = self.state.write();
        let stored = state
            .threads
            .get_mut(&thread.id)
            .ok_or_else(|| AppError::NotFound(format!("Thread with id {} not found", thread.id)))?;

        stored.title = thread.title.clone();
        stored.message = thread.message.clone();
        Ok(stored.clone())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_batch(
        &self,
        thread: &Thread,
        posts: &[NewPost],
        created: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        let mut state = self.state.write();

        // Validate the whole batch before touching any index.
        let mut authors = Vec::with_capacity(posts.len());
        for post in posts {
            let author = state
                .user(&post.author)
                .map(|u| u.nickname.clone())
                .ok_or_else(|| AppError::AuthorNotFound(post.author.clone()))?;
            authors.push(author);
        }
        let first_new_id = state.last_post_id + 1;
        for (index, post) in posts.iter().enumerate() {
            if let Some(parent) = post.parent {
                let in_thread = match state.posts.get(&parent) {
                    Some(existing) => existing.thread == thread.id,
                    // Earlier posts of this batch may be parents too.
                    None => {
                        parent >= first_new_id
                            && parent < first_new_id + index as i64
                    }
                };
                if !in_thread {
                    return Err(AppError::InvalidParent(format!(
                        "Parent post {} was not found in thread {}",
                        parent, thread.id
                    )));
                }
            }
        }

        let mut stored = Vec::with_capacity(posts.len());
        for (post, author) in posts.iter().cloned().zip(authors) {
            state.last_post_id += 1;
            let post = post.into_post(state.last_post_id, thread, author, created);
            state.record_forum_user(&post.forum, &post.author);
            state.posts.insert(post.id, post.clone());
            stored.push(post);
        }

        if let Some(forum) = state.forums.get_mut(&fold_key(&thread.forum)) {
            forum.posts += stored.len() as i64;
        }

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.state.read().posts.get(&id).cloned())
    }

    async fn update_message(&self, id: i64, message: &str) -> Result<Post, AppError> {
        let mut state = self.state.write();
        let post = state
            .posts
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

        post.edit(message);
        Ok(post.clone())
    }
}
