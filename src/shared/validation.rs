//! Validation Utilities

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use super::error::AppError;

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                )
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

/// Convert a single failed field check to AppError
pub fn invalid_field(field: &str, error: ValidationError) -> AppError {
    let message = error.message.map(|m| m.to_string()).unwrap_or_else(|| error.code.to_string());
    AppError::Validation(format!("{}: {}", field, message))
}

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Nicknames: letters, digits, `_` and `.`
pub fn validate_nickname(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rejected("nickname", "Nickname must not be empty"));
    }
    if !value.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
        return Err(rejected("nickname", "Nickname may contain only letters, digits, '_' and '.'"));
    }
    Ok(())
}

/// Forum slugs: letters, digits, `-` and `_`
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rejected("slug", "Slug must not be empty"));
    }
    if !value.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(rejected("slug", "Slug may contain only letters, digits, '-' and '_'"));
    }
    Ok(())
}

/// Thread slugs share the forum slug alphabet but must not look like an id.
/// A blank slug means the thread has none.
pub fn validate_thread_slug(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_slug(value)?;
    if value.chars().all(|c| c.is_ascii_digit()) {
        return Err(rejected("slug", "Thread slug must not be purely numeric"));
    }
    Ok(())
}
