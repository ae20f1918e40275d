//! In-memory implementation of AccountRepository
//!
//! Used by tests and local runs without PostgreSQL. Create-if-absent is a
//! single `DashMap` entry operation, so concurrent registrations of one
//! username yield exactly one account.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{instrument, Span};

use fortune_core::entities::Account;
use fortune_core::error::DomainError;
use fortune_core::traits::{AccountRepository, RepoResult};
use fortune_core::value_objects::AccountId;

/// Thread-safe in-memory account store keyed by username
#[derive(Debug)]
pub struct MemoryAccountRepository {
    accounts: DashMap<String, Account>,
    next_id: AtomicI64,
}

impl Default for MemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    #[instrument(skip_all, fields(account_id))]
    async fn create(&self, username: &str, password_verifier: &str) -> RepoResult<Account> {
        match self.accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateUsername),
            Entry::Vacant(slot) => {
                let id = AccountId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
                let account = Account::new(
                    id,
                    username.to_string(),
                    password_verifier.to_string(),
                    Utc::now(),
                );
                slot.insert(account.clone());
                Span::current().record("account_id", id.into_inner());
                Ok(account)
            }
        }
    }

    #[instrument(skip_all)]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        Ok(self.accounts.get(username).map(|entry| entry.value().clone()))
    }

    #[instrument(skip_all)]
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::format::FmtSpan;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_spans_carry_no_credentials() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_ansi(false)
            .finish();

        let repo = MemoryAccountRepository::new();
        tracing::subscriber::with_default(subscriber, || {
            futures::executor::block_on(async {
                repo.create("alice_01", "$argon2id$stub").await.unwrap();
                repo.find_by_username("alice_01").await.unwrap();
                repo.ping().await.unwrap();
            });
        });

        let output = logs.contents();
        assert!(output.contains("create"));
        assert!(output.contains("account_id=1"));
        assert!(output.contains("find_by_username"));
        assert!(!output.contains("alice_01"));
        assert!(!output.contains("argon2id"));
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryAccountRepository::new();

        let created = repo.create("alice_01", "$argon2id$stub").await.unwrap();
        assert_eq!(created.username, "alice_01");
        assert_eq!(created.password_verifier, "$argon2id$stub");

        let found = repo.find_by_username("alice_01").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = MemoryAccountRepository::new();
        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = MemoryAccountRepository::new();
        repo.create("bob", "first").await.unwrap();

        let err = repo.create("bob", "second").await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateUsername));

        // Original record untouched
        let stored = repo.find_by_username("bob").await.unwrap().unwrap();
        assert_eq!(stored.password_verifier, "first");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let repo = MemoryAccountRepository::new();
        repo.create("Carol", "v1").await.unwrap();
        repo.create("carol", "v2").await.unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let repo = MemoryAccountRepository::new();
        let a = repo.create("user_a", "v").await.unwrap();
        let b = repo.create("user_b", "v").await.unwrap();
        let c = repo.create("user_c", "v").await.unwrap();

        assert!(a.id.into_inner() < b.id.into_inner());
        assert!(b.id.into_inner() < c.id.into_inner());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_single_winner() {
        let repo = Arc::new(MemoryAccountRepository::new());

        let attempts = (0..16).map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.create("racer", &format!("v{i}")).await })
        });

        let results = futures::future::join_all(attempts).await;
        let successes = results
            .iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(DomainError::DuplicateUsername))))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = MemoryAccountRepository::new();
        assert!(repo.ping().await.is_ok());
        assert!(repo.is_empty());
    }
}
