//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - Registration and profile storage
//! - **PgForumRepository** - Forums and the forum-user listing
//! - **PgThreadRepository** - Threads with transactional counter updates
//! - **PgPostRepository** - Post batches and message edits
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{
//!     PgUserRepository, PgForumRepository, PgThreadRepository, PgPostRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let forum_repo = PgForumRepository::new(pool.clone());
//!     let thread_repo = PgThreadRepository::new(pool.clone());
//!     let post_repo = PgPostRepository::new(pool);
//! }
//! ```

pub mod user_repository;
pub mod forum_repository;
pub mod thread_repository;
pub mod post_repository;

pub use user_repository::PgUserRepository;
pub use forum_repository::PgForumRepository;
pub use thread_repository::PgThreadRepository;
pub use post_repository::PgPostRepository;
