//! Business logic services
//!
//! Service layer implementations that validate input and orchestrate the
//! credential store, password hashing and token issuance.

pub mod auth;
pub mod context;
pub mod error;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
