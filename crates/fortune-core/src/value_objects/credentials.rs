//! Credential rules applied before any hashing or storage work
//!
//! - Username: 3-32 bytes, ASCII letters, digits and underscore only
//! - Password: at least 6 characters, no upper bound, no complexity rule

use crate::error::DomainError;

/// Minimum username length
pub const USERNAME_MIN_LEN: usize = 3;

/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 32;

/// Minimum password length
pub const PASSWORD_MIN_LEN: usize = 6;

/// Validate a username
///
/// # Errors
/// Returns `DomainError::InvalidUsername` describing the violated rule
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.len() < USERNAME_MIN_LEN || username.len() > USERNAME_MAX_LEN {
        return Err(DomainError::InvalidUsername(format!(
            "username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }

    if !username
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return Err(DomainError::InvalidUsername(
            "username may only contain letters, digits and underscore".to_string(),
        ));
    }

    Ok(())
}

/// Validate a password
///
/// # Errors
/// Returns `DomainError::WeakPassword` if the password is too short
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(DomainError::WeakPassword(format!(
            "password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }

    Ok(())
}
