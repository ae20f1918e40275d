//! Domain entities - core business objects

mod account;

pub use account::Account;
