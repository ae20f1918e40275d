//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::Account;
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account
    ///
    /// The uniqueness check and the insert are one atomic operation.
    /// Returns `DomainError::DuplicateUsername` if the username is already taken.
    async fn create(&self, username: &str, password_verifier: &str) -> RepoResult<Account>;

    /// Find an account by username (case-sensitive)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}
