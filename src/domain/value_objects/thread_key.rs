//! Thread addressing by slug or numeric id.

use std::fmt;

/// Path segment identifying a thread.
///
/// A segment made only of ASCII digits is a numeric id; anything else is a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadKey {
    Id(i64),
    Slug(String),
}

impl ThreadKey {
    /// Parse a path segment into a key.
    pub fn parse(segment: &str) -> Self {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = segment.parse::<i64>() {
                return Self::Id(id);
            }
        }
        Self::Slug(segment.to_string())
    }
}

impl fmt::Display for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Slug(slug) => write!(f, "{}", slug),
        }
    }
}

impl From<&str> for ThreadKey {
    fn from(segment: &str) -> Self {
        Self::parse(segment)
    }
}
