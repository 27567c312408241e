//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the forum.
//! All entities map directly to their corresponding database tables.
//!
//! - **User**: Registered account, unique by nickname and by email
//! - **Forum**: A forum owned by a user, with thread and post counters
//! - **Thread**: A discussion inside a forum, addressed by slug or id
//! - **Post**: A message in a thread, optionally replying to a parent post
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod user;
mod forum;
mod thread;
mod post;

pub use user::{User, UserRepository};

pub use forum::{Forum, ForumRepository};

pub use thread::{Thread, ThreadPatch, ThreadRepository};

pub use post::{NewPost, Post, PostRepository};
