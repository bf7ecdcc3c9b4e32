//! Local email/password sign-in.
//!
//! Accounts live in the local account store with a per-account random salt
//! and a single salted SHA-256 digest of the password. That keeps a plain
//! password off disk but is not a slow key-derivation function; it only
//! suits an offline, single-user store.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use nurse_core::model::{Identity, UserId};
use sha2::{Digest, Sha256};
use storage::repository::{AccountRecord, AccountRepository, StorageError};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::AuthError;

/// Minimum password length accepted by the local provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Email/password identity provider with an observable session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider rejects the credentials.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Sign an existing account in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the credentials do not match an account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Drop the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot end the session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The signed-in identity, if any.
    fn current(&self) -> Option<Identity>;

    /// Subscribe to identity changes. The receiver always holds the latest
    /// value, so late subscribers see the current session immediately.
    fn watch(&self) -> watch::Receiver<Option<Identity>>;
}

/// Identity provider backed by the local account repository.
pub struct LocalIdentityProvider {
    accounts: Arc<dyn AccountRepository>,
    session: watch::Sender<Option<Identity>>,
}

impl LocalIdentityProvider {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        let (session, _) = watch::channel(None);
        Self { accounts, session }
    }

    fn publish(&self, identity: Option<Identity>) {
        self.session.send_replace(identity);
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let salt = new_salt();
        let record = AccountRecord {
            user_id: UserId::generate(),
            email: email.clone(),
            password_digest: digest_password(&salt, password),
            salt,
        };
        match self.accounts.insert_account(&record).await {
            Ok(()) => {}
            Err(StorageError::Conflict) => return Err(AuthError::EmailInUse),
            Err(err) => return Err(err.into()),
        }

        let identity = Identity::new(record.user_id, email);
        info!(user_id = %identity.user_id(), "account registered");
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email)?;
        let Some(account) = self.accounts.find_account_by_email(&email).await? else {
            debug!("sign-in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if digest_password(&account.salt, password) != account.password_digest {
            debug!(user_id = %account.user_id, "sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let identity = Identity::new(account.user_id, account.email);
        info!(user_id = %identity.user_id(), "signed in");
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(identity) = self.current() {
            info!(user_id = %identity.user_id(), "signed out");
        }
        self.publish(None);
        Ok(())
    }

    fn current(&self) -> Option<Identity> {
        self.session.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
        && !email.chars().any(char::is_whitespace);
    if valid { Ok(email) } else { Err(AuthError::InvalidEmail) }
}

fn new_salt() -> String {
    let bytes: [u8; 16] = rand::random();
    to_hex(&bytes)
}

fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
