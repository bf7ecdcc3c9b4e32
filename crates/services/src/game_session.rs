use std::sync::Arc;

use nurse_core::model::{
    AssessmentKind, ChallengeId, GameState, Identity, ItemId, Mutation, Progress, UserId,
};
use tracing::warn;

use crate::error::ProgressServiceError;
use crate::progress_service::ProgressService;

/// A snapshot write that has not been sent to the store yet.
///
/// Saves are independent: a newer save never cancels an older one, and the
/// store keeps whichever lands last.
#[must_use = "a pending save does nothing until it is run"]
pub struct PendingSave {
    service: Arc<ProgressService>,
    user: UserId,
    snapshot: Progress,
}

impl PendingSave {
    /// Write the snapshot, returning the store outcome.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the write fails.
    pub async fn try_run(self) -> Result<(), ProgressServiceError> {
        self.service.save(&self.user, &self.snapshot).await
    }

    /// Write the snapshot; failures are logged and otherwise ignored.
    pub async fn run(self) {
        let user = self.user.clone();
        if let Err(err) = self.try_run().await {
            warn!(user_id = %user, error = %err, "failed to save progress");
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Progress {
        &self.snapshot
    }
}

/// Game state bound to one signed-in identity.
///
/// Every transition that changes progress hands back a [`PendingSave`]; the
/// caller decides where to run it so input handling never waits on the store.
///
/// A session whose load failed never saves: its empty state would otherwise
/// overwrite the stored document. Start a new session to retry the load.
pub struct GameSession {
    identity: Identity,
    state: GameState,
    progress: Arc<ProgressService>,
    synced: bool,
}

impl GameSession {
    /// Start a session, loading saved progress. A failed load is logged and
    /// the session starts empty and unsynced.
    pub async fn start(identity: Identity, progress: Arc<ProgressService>) -> Self {
        match progress.load(identity.user_id()).await {
            Ok(loaded) => Self::with_progress(identity, progress, loaded),
            Err(err) => {
                warn!(
                    user_id = %identity.user_id(),
                    error = %err,
                    "failed to load progress, starting empty without saving"
                );
                let mut session = Self::with_progress(identity, progress, Progress::new());
                session.synced = false;
                session
            }
        }
    }

    #[must_use]
    pub fn with_progress(
        identity: Identity,
        progress: Arc<ProgressService>,
        loaded: Progress,
    ) -> Self {
        Self {
            identity,
            state: GameState::new(loaded),
            progress,
            synced: true,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether the stored progress was loaded, and so whether changes are saved.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn select_challenge(&mut self, challenge: ChallengeId) {
        let _ = self.state.select_challenge(challenge);
    }

    pub fn close_challenge(&mut self) {
        let _ = self.state.close_challenge();
    }

    pub fn close_assessment(&mut self) {
        let _ = self.state.close_assessment();
    }

    pub fn start_assessment(
        &mut self,
        challenge: ChallengeId,
        kind: AssessmentKind,
    ) -> Option<PendingSave> {
        let mutation = self.state.start_assessment(challenge, kind);
        self.save_if(mutation)
    }

    pub fn click_item(
        &mut self,
        challenge: ChallengeId,
        kind: AssessmentKind,
        item: ItemId,
    ) -> Option<PendingSave> {
        let mutation = self.state.click_item(challenge, kind, item);
        self.save_if(mutation)
    }

    pub fn reset_all(&mut self) -> Option<PendingSave> {
        let mutation = self.state.reset_all();
        self.save_if(mutation)
    }

    fn save_if(&self, mutation: Mutation) -> Option<PendingSave> {
        (self.synced && mutation.is_changed()).then(|| PendingSave {
            service: Arc::clone(&self.progress),
            user: self.identity.user_id().clone(),
            snapshot: self.state.progress().clone(),
        })
    }
}
