use std::sync::Arc;

use services::{IdentityProvider, ProgressService};

pub trait UiApp: Send + Sync {
    fn identity_provider(&self) -> Arc<dyn IdentityProvider>;
    fn progress_service(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    identity_provider: Arc<dyn IdentityProvider>,
    progress_service: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            identity_provider: app.identity_provider(),
            progress_service: app.progress_service(),
        }
    }

    #[must_use]
    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity_provider)
    }

    #[must_use]
    pub fn progress_service(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress_service)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
