//! # Domain Services
//!
//! Domain services encapsulate business logic that doesn't naturally belong
//! to a single entity. They are pure functions over domain entities, so they
//! can be tested without a store.
//!
//! ## Services
//!
//! - **RegistrationResolver**: Conflict set for a colliding registration
//! - **ProfileMerger**: Presence-aware profile patching and email arbitration

mod profile_service;
mod registration_service;

pub use profile_service::*;
pub use registration_service::*;
