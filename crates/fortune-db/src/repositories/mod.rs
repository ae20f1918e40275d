//! Repository implementations
//!
//! Implementations of the `AccountRepository` port defined in fortune-core.

mod account;
mod error;
mod memory;

pub use account::PgAccountRepository;
pub use memory::MemoryAccountRepository;
