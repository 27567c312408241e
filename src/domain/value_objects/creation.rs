//! Outcome of a uniqueness-checked create.

/// Result of a create operation that may collide with existing records.
///
/// A conflict is not an error: it carries the existing record(s) that the
/// new one collides with, so the caller can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creation<T, C = T> {
    Created(T),
    Conflict(C),
}

impl<T, C> Creation<T, C> {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn created(self) -> Option<T> {
        match self {
            Self::Created(value) => Some(value),
            Self::Conflict(_) => None,
        }
    }

    pub fn conflict(self) -> Option<C> {
        match self {
            Self::Created(_) => None,
            Self::Conflict(existing) => Some(existing),
        }
    }

    /// Transform both arms, e.g. into response types.
    pub fn map<U, D>(self, created: impl FnOnce(T) -> U, conflict: impl FnOnce(C) -> D) -> Creation<U, D> {
        match self {
            Self::Created(value) => Creation::Created(created(value)),
            Self::Conflict(existing) => Creation::Conflict(conflict(existing)),
        }
    }
}
