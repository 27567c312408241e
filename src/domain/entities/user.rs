//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::keys_match;
use crate::shared::error::AppError;

/// Represents a registered forum user.
///
/// Maps to the `users` table:
/// - nickname: TEXT PRIMARY KEY (unique case-insensitively)
/// - email: TEXT NOT NULL (unique case-insensitively)
/// - fullname: TEXT NOT NULL
/// - about: TEXT NOT NULL DEFAULT ''
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Nickname (unique, immutable after registration)
    pub nickname: String,

    /// Email address (unique)
    pub email: String,

    /// Display name
    pub fullname: String,

    /// Free-form profile text; empty when cleared
    #[serde(default)]
    pub about: String,
}

impl User {
    /// Check whether `other` is the same stored record as `self`.
    ///
    /// Records are identified by nickname, compared case-insensitively.
    pub fn is_same_record(&self, other: &User) -> bool {
        keys_match(&self.nickname, &other.nickname)
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual storage interactions.
/// Nickname and email lookups are exact matches on their unique indexes,
/// compared case-insensitively.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by nickname.
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, AppError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a new user.
    ///
    /// Fails with `AppError::Conflict` when the nickname or email is already
    /// taken. The check is enforced by the store itself, atomically with the
    /// insert.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Replace fullname, email and about of the user identified by nickname.
    ///
    /// Fails with `AppError::NotFound` when the nickname does not exist and
    /// with `AppError::Conflict` when the email belongs to another user.
    async fn update_profile(&self, user: &User) -> Result<User, AppError>;
}
