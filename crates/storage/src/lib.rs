#![forbid(unsafe_code)]

pub mod document;
pub mod repository;
pub mod sqlite;

pub use document::{CompletionRecord, ProgressDocument};
pub use repository::{
    AccountRecord, AccountRepository, DocumentStore, InMemoryRepository, PROGRESS_COLLECTION,
    Storage, StorageError,
};
