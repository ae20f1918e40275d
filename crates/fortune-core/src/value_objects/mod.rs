//! Value objects - immutable types that represent domain concepts

mod account_id;
mod credentials;

pub use account_id::{AccountId, AccountIdParseError};
pub use credentials::{
    validate_password, validate_username, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
