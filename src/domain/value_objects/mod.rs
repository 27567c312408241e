//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **fold_key / keys_match**: Case-insensitive identifier comparison
//! - **ThreadKey**: Thread address parsed from a slug-or-id path segment
//! - **Creation**: Created-or-conflicting outcome of a uniqueness-checked create
//! - **ThreadFilter / UserFilter**: Bounded, ordered listing filters

mod creation;
mod filters;
mod key;
mod thread_key;

pub use creation::*;
pub use filters::*;
pub use key::*;
pub use thread_key::*;
