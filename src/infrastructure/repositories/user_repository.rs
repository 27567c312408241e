//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Nickname and email lookups go through the `lower()` unique indexes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{User, UserRepository};
use crate::infrastructure::database::unique_violation;
use crate::shared::error::AppError;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    nickname: String,
    email: String,
    fullname: String,
    about: String,
}

impl UserRow {
    /// Convert database row to domain User entity.
    pub(crate) fn into_user(self) -> User {
        User {
            nickname: self.nickname,
            email: self.email,
            fullname: self.fullname,
            about: self.about,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT nickname, email, fullname, about
            FROM users
            WHERE lower(nickname) = lower($1)
            "#,
        )
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT nickname, email, fullname, about
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Insert a user; the unique indexes arbitrate concurrent registrations.
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (nickname, email, fullname, about)
            VALUES ($1, $2, $3, $4)
            RETURNING nickname, email, fullname, about
            "#,
        )
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(&user.fullname)
        .bind(&user.about)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_violation(e, || {
                AppError::Conflict("User with this nickname or email already exists".to_string())
            })
        })?;

        Ok(row.into_user())
    }

    async fn update_profile(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET fullname = $2,
                email = $3,
                about = $4
            WHERE lower(nickname) = lower($1)
            RETURNING nickname, email, fullname, about
            "#,
        )
        .bind(&user.nickname)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.about)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            unique_violation(e, || {
                AppError::Conflict(format!("Email {} is already registered", user.email))
            })
        })?
        .ok_or_else(|| AppError::NotFound(format!("User with nickname {} not found", user.nickname)))?;

        Ok(row.into_user())
    }
}
