#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod error;
pub mod game_session;
pub mod progress_service;

pub use app_services::AppServices;
pub use auth::{IdentityProvider, LocalIdentityProvider};
pub use error::{AppServicesError, AuthError, ProgressServiceError};
pub use game_session::{GameSession, PendingSave};
pub use progress_service::ProgressService;
