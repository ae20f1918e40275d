//! # fortune-db
//!
//! Credential store implementing the `AccountRepository` port.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Schema bootstrap for the `accounts` table
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - PostgreSQL and in-memory repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fortune_common::AppConfig;
//! use fortune_db::{create_pool, ensure_schema, DatabaseConfig, PgAccountRepository};
//! use fortune_core::AccountRepository;
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     ensure_schema(&pool).await?;
//!     let accounts = PgAccountRepository::new(pool);
//!
//!     let found = accounts.find_by_username("alice_01").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{MemoryAccountRepository, PgAccountRepository};
pub use schema::ensure_schema;
