//! Account entity - a username bound to a password verifier

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::AccountId;

/// Account entity
///
/// Created only by registration and never mutated afterwards.
/// `password_verifier` is a PHC hash string and must never reach a response or a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub password_verifier: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create an Account from its stored parts
    pub fn new(
        id: AccountId,
        username: String,
        password_verifier: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_verifier,
            created_at,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_verifier", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
