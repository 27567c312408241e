//! Bounded, ordered retrieval filters for forum listings.

use chrono::{DateTime, Utc};

/// Default number of rows returned by a listing.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Hard upper bound on a listing.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Filter for a forum's threads, ordered by creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadFilter {
    /// Inclusive time bound: `>=` ascending, `<=` descending.
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub desc: bool,
}

impl ThreadFilter {
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit)
    }

    /// Whether a thread created at `created` passes the time bound.
    pub fn admits(&self, created: &DateTime<Utc>) -> bool {
        match &self.since {
            None => true,
            Some(since) if self.desc => created <= since,
            Some(since) => created >= since,
        }
    }
}

/// Filter for a forum's users, ordered by case-folded nickname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Exclusive nickname bound in the sort direction.
    pub since: Option<String>,
    pub limit: Option<u32>,
    pub desc: bool,
}

impl UserFilter {
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit)
    }

    /// Whether a folded nickname key passes the `since` bound.
    pub fn admits(&self, nickname_key: &str) -> bool {
        match &self.since {
            None => true,
            Some(since) => {
                let since = super::fold_key(since);
                if self.desc {
                    nickname_key < since.as_str()
                } else {
                    nickname_key > since.as_str()
                }
            }
        }
    }
}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}
