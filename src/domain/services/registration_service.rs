//! Registration conflict resolution.

use crate::domain::entities::User;

/// Decides whether a registration collides with existing users.
pub struct RegistrationResolver;

impl RegistrationResolver {
    /// Build the conflict set from the two independent uniqueness lookups.
    ///
    /// Returns `None` when neither lookup matched. Otherwise the nickname match
    /// comes first when present; the email match is added unless it is the
    /// very same record, so a full duplicate is reported once.
    pub fn resolve(by_nickname: Option<User>, by_email: Option<User>) -> Option<Vec<User>> {
        match (by_nickname, by_email) {
            (None, None) => None,
            (Some(nickname_match), None) => Some(vec![nickname_match]),
            (None, Some(email_match)) => Some(vec![email_match]),
            (Some(nickname_match), Some(email_match)) => {
                if nickname_match.is_same_record(&email_match) {
                    Some(vec![nickname_match])
                } else {
                    Some(vec![nickname_match, email_match])
                }
            }
        }
    }
}
