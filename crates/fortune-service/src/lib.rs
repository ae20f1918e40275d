//! # fortune-service
//!
//! Application layer containing the registration and login use cases and their DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    HealthResponse, LoginRequest, LoginResponse, ReadinessResponse, RegisterRequest,
    RegisterResponse, RegisteredAccount,
};
pub use services::{AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
