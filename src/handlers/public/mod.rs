// Public handlers: token acquisition (register + login), no auth required.
pub mod auth;
pub mod users;

use std::collections::HashMap;

use crate::error::ApiError;

/// Shared length bounds for registration and login payloads. Character
/// counts, not bytes, so multi-byte usernames are measured the way users see
/// them.
pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    let username_len = username.chars().count();
    if !(1..=32).contains(&username_len) {
        field_errors.insert(
            "username".to_string(),
            "must be between 1 and 32 characters".to_string(),
        );
    }

    let password_len = password.chars().count();
    if !(8..=64).contains(&password_len) {
        field_errors.insert(
            "password".to_string(),
            "must be between 8 and 64 characters".to_string(),
        );
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "Invalid credentials payload",
            Some(field_errors),
        ))
    }
}
