//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{
    HealthChecks, HealthResponse, LoginResponse, ReadinessResponse, RegisterResponse,
    RegisteredAccount,
};
