//! # fortune-core
//!
//! Domain layer containing the account entity, credential rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::Account;
pub use error::DomainError;
pub use traits::{AccountRepository, RepoResult};
pub use value_objects::{
    validate_password, validate_username, AccountId, AccountIdParseError, PASSWORD_MIN_LEN,
    USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
