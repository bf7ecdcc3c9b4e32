use async_trait::async_trait;
use nurse_core::model::UserId;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Collection holding one progress document per user.
pub const PROGRESS_COLLECTION: &str = "userProgress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Schemaless key/value document store: one JSON document per
/// `(collection, key)`, written whole.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document.
    ///
    /// Returns `Ok(None)` when nothing was ever written under the key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or the stored
    /// body is not valid JSON.
    async fn get_document(&self, collection: &str, key: &str)
    -> Result<Option<Value>, StorageError>;

    /// Replace the document under the key. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &Value,
    ) -> Result<(), StorageError>;
}

/// Persisted shape for a local account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub user_id: UserId,
    pub email: String,
    pub password_digest: String,
    pub salt: String,
}

/// Repository contract for locally managed accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError>;

    /// Look an account up by (normalized) email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    documents: Arc<Mutex<HashMap<(String, String), Value>>>,
    accounts: Arc<Mutex<HashMap<String, AccountRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
            accounts: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryRepository {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Value>, StorageError> {
        let guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(&(collection.to_owned(), key.to_owned()))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &Value,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert((collection.to_owned(), key.to_owned()), document.clone());
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryRepository {
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&account.email) {
            return Err(StorageError::Conflict);
        }
        guard.insert(account.email.clone(), account.clone());
        Ok(())
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StorageError> {
        let guard = self
            .accounts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(email).cloned())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub documents: Arc<dyn DocumentStore>,
    pub accounts: Arc<dyn AccountRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let documents: Arc<dyn DocumentStore> = Arc::new(repo.clone());
        let accounts: Arc<dyn AccountRepository> = Arc::new(repo);
        Self {
            documents,
            accounts,
        }
    }
}
