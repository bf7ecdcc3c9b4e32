use std::sync::Arc;

use nurse_core::model::{AssessmentKind, ChallengeId, Progress};
use serde_json::Value;
use services::ProgressService;
use storage::repository::{
    AccountRepository, DocumentStore, InMemoryRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Auth);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Login / Register"), "missing title in {html}");
    assert!(html.contains("Email"), "missing email input in {html}");
    assert!(html.contains("Register"), "missing register button in {html}");
    assert!(!html.contains("auth-error"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_smoke_without_identity_shows_login() {
    let mut harness = setup_view_harness(ViewKind::Gate);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Login / Register"), "missing login in {html}");
    assert!(!html.contains("challenge-grid"), "board rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_smoke_with_identity_renders_board() {
    let mut harness = setup_view_harness(ViewKind::Gate);
    harness
        .services
        .identity()
        .sign_up("nurse@example.com", "secret1")
        .await
        .expect("sign up");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Logged in as: nurse@example.com"), "missing user in {html}");
    assert!(html.contains("Challenge 1"), "missing first card in {html}");
    assert!(html.contains("Challenge 8"), "missing last card in {html}");
    assert!(html.contains("Completed: 0 / 8"), "missing summary in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_smoke_marks_completed_challenges() {
    let storage = Storage::in_memory();
    let mut harness = setup_view_harness_with_storage(ViewKind::Gate, storage);
    let identity = harness
        .services
        .identity()
        .sign_up("done@example.com", "secret1")
        .await
        .expect("sign up");

    let c = ChallengeId::new(0).unwrap();
    let mut progress = Progress::new();
    for kind in AssessmentKind::ALL {
        for item in kind.items() {
            let _ = progress.click_item(c, kind, item);
        }
    }
    ProgressService::new(Arc::clone(&harness.storage.documents))
        .save(identity.user_id(), &progress)
        .await
        .expect("save");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("challenge-card complete"), "missing complete card in {html}");
    assert!(html.contains("Completed: 1 / 8"), "missing summary in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_smoke_returns_to_login_after_sign_out() {
    let mut harness = setup_view_harness(ViewKind::Gate);
    let provider = harness.services.identity();
    provider
        .sign_up("leaving@example.com", "secret1")
        .await
        .expect("sign up");

    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.render().contains("challenge-grid"));

    provider.sign_out().await.expect("sign out");
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Login / Register"), "missing login in {html}");
}

struct OfflineDocuments;

#[async_trait::async_trait]
impl DocumentStore for OfflineDocuments {
    async fn get_document(
        &self,
        _collection: &str,
        _key: &str,
    ) -> Result<Option<Value>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn set_document(
        &self,
        _collection: &str,
        _key: &str,
        _document: &Value,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn gate_smoke_renders_board_when_store_is_offline() {
    let accounts: Arc<dyn AccountRepository> = Arc::new(InMemoryRepository::new());
    let storage = Storage {
        documents: Arc::new(OfflineDocuments),
        accounts,
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Gate, storage);
    harness
        .services
        .identity()
        .sign_up("offline@example.com", "secret1")
        .await
        .expect("sign up");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Challenge 4"), "missing board in {html}");
    assert!(
        html.contains("Saved progress could not be loaded"),
        "missing load warning in {html}"
    );
    assert!(html.contains("game-retry"), "missing retry in {html}");
    assert!(!html.contains("Something went wrong"), "unexpected error in {html}");
}
