use std::sync::Arc;
use std::time::Duration;

use nurse_core::model::{AssessmentKind, ChallengeId, ItemId};
use serde_json::{Value, json};
use storage::repository::{
    AccountRepository, DocumentStore, InMemoryRepository, PROGRESS_COLLECTION, Storage,
    StorageError,
};

use super::game::GameIntent;
use super::test_harness::{ViewKind, drive_dom, setup_view_harness_with_storage};

fn item(n: usize) -> ItemId {
    ItemId::new(format!("Item {n}")).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn game_intents_smoke_play_assessment_then_reset() {
    let storage = Storage::in_memory();
    let mut harness = setup_view_harness_with_storage(ViewKind::Intents, storage);
    let identity = harness
        .services
        .identity()
        .sign_up("intents@example.com", "secret1")
        .await
        .expect("sign up");
    harness.rebuild();
    harness.drive_async().await;

    let dispatch = harness.dispatch();
    let c = ChallengeId::new(0).unwrap();

    dispatch.call(GameIntent::SelectChallenge(c));
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(html.contains("Skin Assessment"), "missing dialog in {html}");
    assert!(html.contains("assessment-button locked"), "injury not locked in {html}");

    dispatch.call(GameIntent::StartAssessment(c, AssessmentKind::Injury));
    drive_dom(&mut harness.dom);
    assert!(!harness.render().contains("Go Back"));

    dispatch.call(GameIntent::StartAssessment(c, AssessmentKind::Skin));
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(html.contains("Go Back"), "assessment not open in {html}");
    assert!(html.contains("0 / 4"), "missing counter in {html}");

    for n in 1..=4 {
        dispatch.call(GameIntent::ClickItem(c, AssessmentKind::Skin, item(n)));
    }
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("4 / 4"), "missing counter in {html}");
    assert!(html.contains("item-button clicked"), "missing clicked item in {html}");

    let stored = harness
        .storage
        .documents
        .get_document(PROGRESS_COLLECTION, identity.user_id().as_str())
        .await
        .unwrap()
        .expect("document written");
    assert_eq!(stored["assessmentCompletion"]["0"]["skin"], json!(true));
    assert_eq!(
        stored["clickedItems"]["0"]["skin"],
        json!(["Item 1", "Item 2", "Item 3", "Item 4"])
    );

    dispatch.call(GameIntent::CloseAssessment);
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(html.contains("assessment-button done"), "skin not done in {html}");

    dispatch.call(GameIntent::ResetAll);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Completed: 0 / 8"), "missing summary in {html}");
    assert!(!html.contains("class=\"dialog\""), "dialog still open in {html}");

    let stored = harness
        .storage
        .documents
        .get_document(PROGRESS_COLLECTION, identity.user_id().as_str())
        .await
        .unwrap();
    assert_eq!(
        stored,
        Some(json!({ "assessmentCompletion": {}, "clickedItems": {} }))
    );
}

/// Writes land only after a short delay.
struct SlowDocuments {
    inner: InMemoryRepository,
}

#[async_trait::async_trait]
impl DocumentStore for SlowDocuments {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Value>, StorageError> {
        self.inner.get_document(collection, key).await
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &Value,
    ) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.inner.set_document(collection, key, document).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn game_intents_smoke_save_outlives_sign_out() {
    let accounts: Arc<dyn AccountRepository> = Arc::new(InMemoryRepository::new());
    let storage = Storage {
        documents: Arc::new(SlowDocuments {
            inner: InMemoryRepository::new(),
        }),
        accounts,
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Intents, storage);
    let provider = harness.services.identity();
    let identity = provider
        .sign_up("quick-exit@example.com", "secret1")
        .await
        .expect("sign up");
    harness.rebuild();
    harness.drive_async().await;

    let dispatch = harness.dispatch();
    let c = ChallengeId::new(2).unwrap();
    dispatch.call(GameIntent::SelectChallenge(c));
    dispatch.call(GameIntent::ClickItem(c, AssessmentKind::Skin, item(1)));

    provider.sign_out().await.expect("sign out");
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Signed out"), "board still mounted in {html}");

    let stored = harness
        .storage
        .documents
        .get_document(PROGRESS_COLLECTION, identity.user_id().as_str())
        .await
        .unwrap()
        .expect("save finished after the board unmounted");
    assert_eq!(stored["clickedItems"]["2"]["skin"], json!(["Item 1"]));
}
