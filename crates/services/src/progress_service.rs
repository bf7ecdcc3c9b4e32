use std::sync::Arc;

use nurse_core::model::{Progress, UserId};
use storage::document::ProgressDocument;
use storage::repository::{DocumentStore, PROGRESS_COLLECTION};
use tracing::debug;

use crate::error::ProgressServiceError;

/// Mirrors a user's progress to and from the document store.
#[derive(Clone)]
pub struct ProgressService {
    documents: Arc<dyn DocumentStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Load saved progress for `user`, or empty progress if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store cannot be read or
    /// the stored document has the wrong shape.
    pub async fn load(&self, user: &UserId) -> Result<Progress, ProgressServiceError> {
        let Some(value) = self
            .documents
            .get_document(PROGRESS_COLLECTION, user.as_str())
            .await?
        else {
            debug!(user_id = %user, "no saved progress");
            return Ok(Progress::new());
        };

        let progress = ProgressDocument::from_value(value)?.into_progress();
        debug!(
            user_id = %user,
            completed = progress.completed_count(),
            "loaded progress"
        );
        Ok(progress)
    }

    /// Overwrite the stored document for `user` with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn save(&self, user: &UserId, progress: &Progress) -> Result<(), ProgressServiceError> {
        let value = ProgressDocument::from_progress(progress).to_value()?;
        self.documents
            .set_document(PROGRESS_COLLECTION, user.as_str(), &value)
            .await?;
        debug!(user_id = %user, "saved progress");
        Ok(())
    }
}
