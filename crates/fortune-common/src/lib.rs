//! # fortune-common
//!
//! Shared utilities including configuration, error handling, credential hashing,
//! session tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{PasswordService, SessionClaims, TokenService, SESSION_TTL_SECONDS};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, HttpConfig,
    JwtConfig, PasswordHashConfig, ServerConfig,
};
pub use error::{AppError, AppResult, INTERNAL_ERROR_MESSAGE};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
