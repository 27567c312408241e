//! Case-insensitive identifier keys.
//!
//! Nicknames, emails, forum slugs and thread slugs are unique without regard
//! to letter case. Values are stored with the case they were created with and
//! compared through their folded key. No Unicode normalization is applied.

/// Fold an identifier to its comparison key.
pub fn fold_key(value: &str) -> String {
    value.to_lowercase()
}

/// Check whether two identifiers refer to the same key.
pub fn keys_match(a: &str, b: &str) -> bool {
    a == b || fold_key(a) == fold_key(b)
}
