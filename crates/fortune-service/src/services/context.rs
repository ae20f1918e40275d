//! Service context - dependency container for services
//!
//! Holds the credential store, the password hasher and the token signer.

use std::sync::Arc;

use fortune_common::{AppError, AppResult, PasswordService, TokenService};
use fortune_core::traits::AccountRepository;

/// Service context containing all dependencies
///
/// Cloning is cheap: every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    account_repo: Arc<dyn AccountRepository>,
    password_service: Arc<PasswordService>,
    token_service: Arc<TokenService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_service: Arc<PasswordService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            account_repo,
            password_service,
            token_service,
        }
    }

    /// Get the account repository
    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    /// Get the password service
    ///
    /// Returned as the shared handle so it can move onto the blocking pool.
    pub fn password_service(&self) -> &Arc<PasswordService> {
        &self.password_service
    }

    /// Get the token service
    pub fn token_service(&self) -> &TokenService {
        self.token_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("account_repo", &"dyn AccountRepository")
            .field("password_service", &self.password_service)
            .field("token_service", &self.token_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    account_repo: Option<Arc<dyn AccountRepository>>,
    password_service: Option<Arc<PasswordService>>,
    token_service: Option<Arc<TokenService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn token_service(mut self, service: Arc<TokenService>) -> Self {
        self.token_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `AppError::Config` if any required dependency is missing
    pub fn build(self) -> AppResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.account_repo.ok_or_else(|| missing("account_repo"))?,
            self.password_service.ok_or_else(|| missing("password_service"))?,
            self.token_service.ok_or_else(|| missing("token_service"))?,
        ))
    }
}

fn missing(dependency: &str) -> AppError {
    AppError::Config(format!("{dependency} is required"))
}
