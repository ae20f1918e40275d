//! Schema bootstrap for the credential store
//!
//! Idempotent; safe to run on every startup.

use sqlx::PgPool;
use tracing::{info, instrument};

/// DDL for the accounts table
///
/// The `UNIQUE` constraint on `username` is what makes account creation atomic.
pub const ACCOUNTS_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS accounts (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(64) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

/// Create the accounts table if it does not exist
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(ACCOUNTS_SCHEMA).execute(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
