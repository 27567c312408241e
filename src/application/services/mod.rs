//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **UserService**: Registration conflicts and profile management
//! - **ForumService**: Forums, thread creation, forum listings
//! - **ThreadService**: Thread lookup and edits, batch post creation
//! - **PostService**: Post details and message edits

pub mod forum_service;
pub mod post_service;
pub mod thread_service;
pub mod user_service;

// Re-export user service types
pub use user_service::{Registration, UserService, UserServiceImpl};

// Re-export forum service types
pub use forum_service::{CreateForumDto, CreateThreadDto, ForumService, ForumServiceImpl};

// Re-export thread service types
pub use thread_service::{ThreadService, ThreadServiceImpl};

// Re-export post service types
pub use post_service::{PostDetails, PostService, PostServiceImpl, Related};
