//! User Service
//!
//! Registration with conflict reporting, profile lookup, and presence-aware
//! profile updates.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Creation, ProfileMerger, RegistrationResolver, User, UserPatch, UserRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Outcome of a registration: the created user, or the users it collides with.
pub type Registration = Creation<User, Vec<User>>;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user, reporting existing users on collision
    async fn register(&self, user: User) -> Result<Registration, AppError>;

    /// Get user by nickname
    async fn get_profile(&self, nickname: &str) -> Result<User, AppError>;

    /// Apply a partial profile update
    async fn update_profile(&self, nickname: &str, patch: UserPatch) -> Result<User, AppError>;
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository + ?Sized,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository + ?Sized,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Look up both uniqueness axes and build the conflict set, if any.
    async fn find_conflict(&self, user: &User) -> Result<Option<Vec<User>>, AppError> {
        let by_nickname = self.user_repo.find_by_nickname(&user.nickname).await?;
        let by_email = self.user_repo.find_by_email(&user.email).await?;

        Ok(RegistrationResolver::resolve(by_nickname, by_email))
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + ?Sized + 'static,
{
    async fn register(&self, user: User) -> Result<Registration, AppError> {
        if let Some(existing) = self.find_conflict(&user).await? {
            tracing::info!(
                nickname = %user.nickname,
                conflicts = existing.len(),
                "Registration rejected"
            );
            metrics::record_create_conflict("user");
            return Ok(Creation::Conflict(existing));
        }

        match self.user_repo.create(&user).await {
            Ok(created) => {
                tracing::info!(nickname = %created.nickname, "User registered");
                Ok(Creation::Created(created))
            }
            // A concurrent registration won the race; report who it was.
            Err(e) if e.is_conflict() => {
                tracing::debug!(nickname = %user.nickname, "Registration lost uniqueness race");
                metrics::record_create_conflict("user");
                match self.find_conflict(&user).await? {
                    Some(existing) => Ok(Creation::Conflict(existing)),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn get_profile(&self, nickname: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_nickname(nickname)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find user by nickname: {}", nickname)))
    }

    async fn update_profile(&self, nickname: &str, patch: UserPatch) -> Result<User, AppError> {
        let current = self.get_profile(nickname).await?;

        if patch.is_empty() {
            return Ok(current);
        }

        if let Some(email) = &patch.email {
            let owner = self.user_repo.find_by_email(email).await?;
            if ProfileMerger::email_taken(&current, owner.as_ref()) {
                return Err(AppError::Conflict(format!(
                    "This email is already registered by user: {}",
                    owner.map(|u| u.nickname).unwrap_or_default()
                )));
            }
        }

        let merged = ProfileMerger::merge(&current, &patch);
        let updated = self.user_repo.update_profile(&merged).await?;
        tracing::debug!(nickname = %updated.nickname, "Profile updated");

        Ok(updated)
    }
}
