//! Profile update merging.

use crate::domain::entities::User;

/// Presence-aware partial update of a user profile.
///
/// `None` leaves the current value untouched; `Some("")` explicitly clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none() && self.email.is_none() && self.about.is_none()
    }
}

/// Merges profile patches into stored users.
pub struct ProfileMerger;

impl ProfileMerger {
    /// Check whether the patched email already belongs to someone else.
    ///
    /// `email_owner` is the result of looking up the patched email.
    pub fn email_taken(current: &User, email_owner: Option<&User>) -> bool {
        email_owner.is_some_and(|owner| !owner.is_same_record(current))
    }

    /// Overlay the present fields of `patch` onto `current`.
    ///
    /// The nickname is never changed.
    pub fn merge(current: &User, patch: &UserPatch) -> User {
        let mut merged = current.clone();

        if let Some(fullname) = &patch.fullname {
            merged.fullname = fullname.clone();
        }
        if let Some(email) = &patch.email {
            merged.email = email.clone();
        }
        if let Some(about) = &patch.about {
            merged.about = about.clone();
        }

        merged
    }
}
