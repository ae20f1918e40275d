//! Authentication service
//!
//! Handles account registration and login.

use std::sync::Arc;

use fortune_core::{validate_password, validate_username, DomainError};
use tokio::task::{self, JoinError};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisteredAccount};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    ///
    /// Rules are checked before any hashing or storage. The store decides
    /// uniqueness atomically; a lost race surfaces as `DuplicateUsername`.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisteredAccount> {
        validate_username(&request.username)?;
        validate_password(&request.password)?;

        let passwords = Arc::clone(self.ctx.password_service());
        let password = request.password;
        let verifier = task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(blocking_failed)??;

        let account = match self
            .ctx
            .account_repo()
            .create(&request.username, &verifier)
            .await
        {
            Ok(account) => account,
            Err(DomainError::DuplicateUsername) => {
                warn!("Registration rejected: username taken");
                return Err(DomainError::DuplicateUsername.into());
            }
            Err(e) => return Err(ServiceError::internal(e.to_string())),
        };

        info!(account_id = %account.id, "Account registered successfully");

        Ok(RegisteredAccount {
            id: account.id,
            username: account.username,
        })
    }

    /// Login with username and password
    ///
    /// Unknown username and wrong password produce the same error. The
    /// unknown-username path still runs one verification so both cost the same.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let account = self
            .ctx
            .account_repo()
            .find_by_username(&request.username)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let passwords = Arc::clone(self.ctx.password_service());
        let password = request.password;

        let Some(account) = account else {
            task::spawn_blocking(move || passwords.verify_dummy(&password))
                .await
                .map_err(blocking_failed)?;
            warn!("Login failed: unknown username");
            return Err(ServiceError::invalid_credentials());
        };

        let verifier = account.password_verifier.clone();
        let is_valid = task::spawn_blocking(move || passwords.verify(&password, &verifier))
            .await
            .map_err(blocking_failed)??;

        if !is_valid {
            warn!(account_id = %account.id, "Login failed: invalid password");
            return Err(ServiceError::invalid_credentials());
        }

        let token = self
            .ctx
            .token_service()
            .issue(account.id, &account.username)?;

        info!(account_id = %account.id, "Account logged in successfully");

        Ok(LoginResponse::new(token))
    }
}

fn blocking_failed(err: JoinError) -> ServiceError {
    ServiceError::internal(format!("blocking task failed: {err}"))
}
