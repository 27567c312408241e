//! Forum Repository Implementation
//!
//! PostgreSQL implementation of the ForumRepository trait, including the
//! forum-user listing backed by the `forum_users` index table.

use async_trait::async_trait;
use sqlx::PgPool;

use super::user_repository::UserRow;
use crate::domain::{Forum, ForumRepository, User, UserFilter};
use crate::infrastructure::database::unique_violation;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ForumRow {
    slug: String,
    title: String,
    owner: String,
    threads: i64,
    posts: i64,
}

impl ForumRow {
    fn into_forum(self) -> Forum {
        Forum {
            slug: self.slug,
            title: self.title,
            user: self.owner,
            threads: self.threads,
            posts: self.posts,
        }
    }
}

/// PostgreSQL forum repository implementation.
#[derive(Clone)]
pub struct PgForumRepository {
    pool: PgPool,
}

impl PgForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumRepository for PgForumRepository {
    /// Insert a forum, resolving the owner to its stored nickname in the same
    /// statement. No row inserted means the owner does not exist.
    async fn create(&self, forum: &Forum) -> Result<Forum, AppError> {
        let row = sqlx::query_as::<_, ForumRow>(
            r#"
            INSERT INTO forums (slug, title, owner)
            SELECT $1, $2, u.nickname
            FROM users u
            WHERE lower(u.nickname) = lower($3)
            RETURNING slug, title, owner, threads, posts
            "#,
        )
        .bind(&forum.slug)
        .bind(&forum.title)
        .bind(&forum.user)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            unique_violation(e, || AppError::Conflict(format!("Forum {} already exists", forum.slug)))
        })?
        .ok_or_else(|| AppError::OwnerNotFound(forum.user.clone()))?;

        Ok(row.into_forum())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Forum>, AppError> {
        let row = sqlx::query_as::<_, ForumRow>(
            r#"
            SELECT slug, title, owner, threads, posts
            FROM forums
            WHERE lower(slug) = lower($1)
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_forum()))
    }

    /// Users ordered by folded nickname in byte order, matching the
    /// in-memory store.
    async fn find_users(&self, slug: &str, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        let limit = filter.effective_limit() as i64;

        let rows = if filter.desc {
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT u.nickname, u.email, u.fullname, u.about
                FROM forum_users fu
                JOIN users u ON u.nickname = fu.nickname
                WHERE lower(fu.forum) = lower($1)
                  AND ($2::text IS NULL OR lower(u.nickname) COLLATE "C" < lower($2) COLLATE "C")
                ORDER BY lower(u.nickname) COLLATE "C" DESC
                LIMIT $3
                "#,
            )
            .bind(slug)
            .bind(&filter.since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT u.nickname, u.email, u.fullname, u.about
                FROM forum_users fu
                JOIN users u ON u.nickname = fu.nickname
                WHERE lower(fu.forum) = lower($1)
                  AND ($2::text IS NULL OR lower(u.nickname) COLLATE "C" > lower($2) COLLATE "C")
                ORDER BY lower(u.nickname) COLLATE "C" ASC
                LIMIT $3
                "#,
            )
            .bind(slug)
            .bind(&filter.since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows.into_iter().map(|r| r.into_user()).collect())
    }
}
