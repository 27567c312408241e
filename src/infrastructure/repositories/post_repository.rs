//! Post Repository Implementation
//!
//! PostgreSQL implementation of post storage. A batch of posts is inserted
//! in one transaction together with the forum's post counter and the
//! forum-user index, so a failed batch leaves no trace.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{fold_key, NewPost, Post, PostRepository, Thread};
use crate::infrastructure::database::constraint_violation;
use crate::shared::error::AppError;

/// Internal row type for post queries.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    parent: Option<i64>,
    author: String,
    message: String,
    is_edited: bool,
    forum: String,
    thread: i64,
    created: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            parent: self.parent,
            author: self.author,
            message: self.message,
            is_edited: self.is_edited,
            forum: self.forum,
            thread: self.thread,
            created: self.created,
        }
    }
}

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create_batch(
        &self,
        thread: &Thread,
        posts: &[NewPost],
        created: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Resolve every author to its stored nickname before inserting.
        let mut authors: HashMap<String, String> = HashMap::new();
        for post in posts {
            let key = fold_key(&post.author);
            if authors.contains_key(&key) {
                continue;
            }
            let nickname = sqlx::query_scalar::<_, String>(
                "SELECT nickname FROM users WHERE lower(nickname) = lower($1)",
            )
            .bind(&post.author)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::AuthorNotFound(post.author.clone()))?;
            authors.insert(key, nickname);
        }

        let mut stored = Vec::with_capacity(posts.len());
        for post in posts {
            if let Some(parent) = post.parent {
                let parent_thread = sqlx::query_scalar::<_, i64>("SELECT thread FROM posts WHERE id = $1")
                    .bind(parent)
                    .fetch_optional(&mut *tx)
                    .await?;
                if parent_thread != Some(thread.id) {
                    return Err(AppError::InvalidParent(format!(
                        "Parent post {} was not found in thread {}",
                        parent, thread.id
                    )));
                }
            }

            let author = &authors[&fold_key(&post.author)];
            let row = sqlx::query_as::<_, PostRow>(
                r#"
                INSERT INTO posts (parent, author, message, is_edited, forum, thread, created)
                VALUES ($1, $2, $3, FALSE, $4, $5, $6)
                RETURNING id, parent, author, message, is_edited, forum, thread, created
                "#,
            )
            .bind(post.parent)
            .bind(author)
            .bind(&post.message)
            .bind(&thread.forum)
            .bind(thread.id)
            .bind(created)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                constraint_violation(
                    e,
                    || AppError::Conflict("Duplicate post".to_string()),
                    || AppError::NotFound(format!("Thread with id {} not found", thread.id)),
                )
            })?;
            stored.push(row.into_post());
        }

        if !stored.is_empty() {
            sqlx::query("UPDATE forums SET posts = posts + $2 WHERE slug = $1")
                .bind(&thread.forum)
                .bind(stored.len() as i64)
                .execute(&mut *tx)
                .await?;

            for author in authors.values() {
                sqlx::query(
                    "INSERT INTO forum_users (forum, nickname) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(&thread.forum)
                .bind(author)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, parent, author, message, is_edited, forum, thread, created
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    /// Single-statement edit: the `edited` flag is derived from the old
    /// message, so concurrent edits cannot clear it.
    async fn update_message(&self, id: i64, message: &str) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET message = CASE WHEN $2 <> '' THEN $2 ELSE message END,
                is_edited = is_edited OR ($2 <> '' AND $2 <> message)
            WHERE id = $1
            RETURNING id, parent, author, message, is_edited, forum, thread, created
            "#,
        )
        .bind(id)
        .bind(message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

        Ok(row.into_post())
    }
}
