//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! The rules delegate to `fortune_core` so the HTTP layer and the service agree.

use std::borrow::Cow;
use std::fmt;

use fortune_core::DomainError;
use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
///
/// Rejects bad input at the HTTP edge. `AuthService::register` applies the
/// same `fortune_core` rules again for callers that bypass this DTO.
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "username_rule"))]
    pub username: String,

    #[validate(custom(function = "password_rule"))]
    pub password: String,
}

/// Login request
///
/// Only presence is checked here; wrong values are an authentication
/// failure, not a validation failure.
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,

    pub password: String,
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn rule_violation(code: &'static str, err: DomainError) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(err.to_string()))
}

fn username_rule(username: &str) -> Result<(), ValidationError> {
    fortune_core::validate_username(username).map_err(|e| rule_violation("username", e))
}

fn password_rule(password: &str) -> Result<(), ValidationError> {
    fortune_core::validate_password(password).map_err(|e| rule_violation("password", e))
}
