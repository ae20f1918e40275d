//! Credential hashing and session token utilities

mod password;
mod token;

pub use password::PasswordService;
pub use token::{SessionClaims, TokenService, SESSION_TTL_SECONDS};
