//! # Domain Layer
//!
//! The domain layer contains the core business logic of the forum.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Forum, Thread, Post) and repository traits
//! - **value_objects**: Immutable value types (keys, filters, create outcomes)
//! - **services**: Registration conflict resolution and profile merging
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Pure business logic and domain rules
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
