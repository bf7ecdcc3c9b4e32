//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by an `IdentityProvider`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("the email address is badly formatted")]
    InvalidEmail,
    #[error("password should be at least {min} characters")]
    WeakPassword { min: usize },
    #[error("the email address is already in use by another account")]
    EmailInUse,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Provider-level failures whose message is meant for the user. Storage
    /// failures are not, and get a generic message at the form.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail
                | Self::WeakPassword { .. }
                | Self::EmailInUse
                | Self::InvalidCredentials
        )
    }
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
