use nurse_core::model::Identity;
use services::{AuthError, IdentityProvider};

/// Shown when the provider fails in a way it has no message for.
pub const UNKNOWN_AUTH_ERROR: &str = "An unknown error occurred";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Register,
    Login,
}

/// Form state for the login/register screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthVm {
    error: Option<String>,
    busy: bool,
}

impl AuthVm {
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn begin(&mut self) {
        self.busy = true;
    }

    /// Record the provider's answer; a success clears the previous error.
    pub fn finish(&mut self, result: &Result<Identity, AuthError>) {
        self.busy = false;
        self.error = result.as_ref().err().map(auth_error_message);
    }
}

/// User-facing text for an authentication failure.
#[must_use]
pub fn auth_error_message(err: &AuthError) -> String {
    if err.is_recognized() {
        err.to_string()
    } else {
        UNKNOWN_AUTH_ERROR.to_owned()
    }
}

/// Run the requested action against the provider. No local validation; the
/// provider decides what a valid email or password is.
///
/// # Errors
///
/// Returns the provider's `AuthError` unchanged.
pub async fn submit_auth(
    provider: &dyn IdentityProvider,
    action: AuthAction,
    email: &str,
    password: &str,
) -> Result<Identity, AuthError> {
    match action {
        AuthAction::Register => provider.sign_up(email, password).await,
        AuthAction::Login => provider.sign_in(email, password).await,
    }
}
