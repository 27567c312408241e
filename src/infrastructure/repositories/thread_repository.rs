//! Thread Repository Implementation
//!
//! PostgreSQL implementation of the ThreadRepository trait. Thread creation
//! runs in one transaction with the forum counter bump and the forum-user
//! index insert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Thread, ThreadFilter, ThreadRepository};
use crate::infrastructure::database::unique_violation;
use crate::shared::error::AppError;

/// Internal row type for thread queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ThreadRow {
    id: i64,
    slug: Option<String>,
    forum: String,
    author: String,
    title: String,
    message: String,
    votes: i32,
    created: DateTime<Utc>,
}

impl ThreadRow {
    pub(crate) fn into_thread(self) -> Thread {
        Thread {
            id: self.id,
            slug: self.slug,
            forum: self.forum,
            author: self.author,
            title: self.title,
            message: self.message,
            votes: self.votes,
            created: self.created,
        }
    }
}

/// PostgreSQL thread repository implementation.
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn create(&self, thread: &Thread) -> Result<Thread, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the forum row: its counter is bumped below.
        let forum = sqlx::query_scalar::<_, String>(
            "SELECT slug FROM forums WHERE lower(slug) = lower($1) FOR UPDATE",
        )
        .bind(&thread.forum)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::ForumNotFound(thread.forum.clone()))?;

        let author = sqlx::query_scalar::<_, String>(
            "SELECT nickname FROM users WHERE lower(nickname) = lower($1)",
        )
        .bind(&thread.author)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::AuthorNotFound(thread.author.clone()))?;

        let slug = Thread::normalize_slug(thread.slug.clone());
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            INSERT INTO threads (slug, forum, author, title, message, votes, created)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, slug, forum, author, title, message, votes, created
            "#,
        )
        .bind(&slug)
        .bind(&forum)
        .bind(&author)
        .bind(&thread.title)
        .bind(&thread.message)
        .bind(thread.votes)
        .bind(thread.created)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            unique_violation(e, || {
                AppError::Conflict(format!(
                    "Thread {} already exists",
                    slug.as_deref().unwrap_or_default()
                ))
            })
        })?;

        sqlx::query("UPDATE forums SET threads = threads + 1 WHERE slug = $1")
            .bind(&forum)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO forum_users (forum, nickname) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(&forum)
        .bind(&author)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_thread())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Thread>, AppError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            SELECT id, slug, forum, author, title, message, votes, created
            FROM threads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_thread()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Thread>, AppError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            SELECT id, slug, forum, author, title, message, votes, created
            FROM threads
            WHERE lower(slug) = lower($1)
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_thread()))
    }

    /// Threads of a forum by creation time; `since` is inclusive.
    async fn find_by_forum(&self, forum: &str, filter: &ThreadFilter) -> Result<Vec<Thread>, AppError> {
        let limit = filter.effective_limit() as i64;

        let rows = if filter.desc {
            sqlx::query_as::<_, ThreadRow>(
                r#"
                SELECT id, slug, forum, author, title, message, votes, created
                FROM threads
                WHERE lower(forum) = lower($1)
                  AND ($2::timestamptz IS NULL OR created <= $2)
                ORDER BY created DESC, id DESC
                LIMIT $3
                "#,
            )
            .bind(forum)
            .bind(filter.since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, ThreadRow>(
                r#"
                SELECT id, slug, forum, author, title, message, votes, created
                FROM threads
                WHERE lower(forum) = lower($1)
                  AND ($2::timestamptz IS NULL OR created >= $2)
                ORDER BY created ASC, id ASC
                LIMIT $3
                "#,
            )
            .bind(forum)
            .bind(filter.since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows.into_iter().map(|r| r.into_thread()).collect())
    }

    async fn update(&self, thread: &Thread) -> Result<Thread, AppError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            UPDATE threads
            SET title = $2,
                message = $3
            WHERE id = $1
            RETURNING id, slug, forum, author, title, message, votes, created
            "#,
        )
        .bind(thread.id)
        .bind(&thread.title)
        .bind(&thread.message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Thread with id {} not found", thread.id)))?;

        Ok(row.into_thread())
    }
}
