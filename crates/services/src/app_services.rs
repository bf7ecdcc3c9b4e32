use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::auth::{IdentityProvider, LocalIdentityProvider};
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles the app-facing services on top of one storage backend.
#[derive(Clone)]
pub struct AppServices {
    identity: Arc<dyn IdentityProvider>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        info!(db_url, "storage ready");
        Ok(Self::from_storage(&storage))
    }

    /// Build services over volatile in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory())
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(LocalIdentityProvider::new(Arc::clone(&storage.accounts)));
        let progress = Arc::new(ProgressService::new(Arc::clone(&storage.documents)));
        Self { identity, progress }
    }

    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
