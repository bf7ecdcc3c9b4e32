use dioxus::prelude::*;
use dioxus::core::spawn_forever;
use nurse_core::model::{AssessmentKind, ChallengeId, Identity, ItemId};
use services::{GameSession, PendingSave};
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AssessmentButtonVm, BoardVm, ChallengeCardVm, DialogVm, ItemButtonVm, map_board,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum GameIntent {
    SelectChallenge(ChallengeId),
    CloseChallenge,
    StartAssessment(ChallengeId, AssessmentKind),
    CloseAssessment,
    ClickItem(ChallengeId, AssessmentKind, ItemId),
    ResetAll,
}

/// Saves run on the root scope so a save in flight when the view unmounts
/// (logout, user switch) still reaches the store.
fn run_save(save: Option<PendingSave>) {
    if let Some(save) = save {
        let _ = spawn_forever(save.run());
    }
}

#[derive(Clone, Copy)]
pub(crate) struct GameSessionState {
    pub session: Signal<Option<GameSession>>,
    pub resource: Resource<Result<(), ViewError>>,
}

/// Load the identity's progress into a session signal. The resource reports
/// `ProgressUnavailable` when the load failed; the session still exists and
/// plays, but does not save.
pub(crate) fn use_game_session(identity: Identity) -> GameSessionState {
    let ctx = use_context::<AppContext>();
    let progress_service = ctx.progress_service();
    let session = use_signal(|| None::<GameSession>);

    let resource = use_resource(move || {
        let progress_service = progress_service.clone();
        let identity = identity.clone();
        let mut session = session;
        async move {
            let started = GameSession::start(identity, progress_service).await;
            let synced = started.is_synced();
            session.set(Some(started));
            if synced {
                Ok(())
            } else {
                Err(ViewError::ProgressUnavailable)
            }
        }
    });

    GameSessionState { session, resource }
}

pub(crate) fn use_game_dispatcher(session: Signal<Option<GameSession>>) -> Callback<GameIntent> {
    use_callback(move |intent: GameIntent| {
        let mut session = session;
        let mut guard = session.write();
        let Some(game) = guard.as_mut() else {
            return;
        };
        let save = match intent {
            GameIntent::SelectChallenge(id) => {
                game.select_challenge(id);
                None
            }
            GameIntent::CloseChallenge => {
                game.close_challenge();
                None
            }
            GameIntent::StartAssessment(id, kind) => game.start_assessment(id, kind),
            GameIntent::CloseAssessment => {
                game.close_assessment();
                None
            }
            GameIntent::ClickItem(id, kind, item) => game.click_item(id, kind, item),
            GameIntent::ResetAll => game.reset_all(),
        };
        drop(guard);
        run_save(save);
    })
}

#[component]
pub fn GameView(identity: Identity) -> Element {
    let ctx = use_context::<AppContext>();
    let provider = ctx.identity_provider();

    let email = identity.email().to_owned();
    let GameSessionState {
        session,
        mut resource,
    } = use_game_session(identity);
    let state = view_state_from_resource(&resource);
    let dispatch = use_game_dispatcher(session);

    let logout = move |_: MouseEvent| {
        let provider = provider.clone();
        spawn(async move {
            if let Err(err) = provider.sign_out().await {
                warn!(error = %err, "sign-out failed");
            }
        });
    };

    let board = session.read().as_ref().map(|game| map_board(game.state()));

    rsx! {
        div { class: "game",
            header { class: "game-header",
                h1 { "Nurse Gamification Challenge" }
                span { class: "game-user", "Logged in as: {email}" }
                button {
                    id: "game-reset",
                    class: "btn btn-secondary",
                    onclick: move |_| dispatch.call(GameIntent::ResetAll),
                    "Reset progress"
                }
                button { id: "game-logout", class: "btn btn-danger", onclick: logout, "Logout" }
            }

            if let ViewState::Error(err) = state {
                div { class: "game-error",
                    p { {err.message()} }
                    button {
                        id: "game-retry",
                        class: "btn btn-secondary",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                }
            }

            match board {
                Some(board) => rsx! {
                    Board { board, on_intent: dispatch }
                },
                None => rsx! {
                    p { "Loading progress..." }
                },
            }
        }
    }
}

#[component]
pub(crate) fn Board(board: BoardVm, on_intent: Callback<GameIntent>) -> Element {
    let BoardVm {
        cards,
        completed,
        total,
        dialog,
    } = board;
    rsx! {
        p { class: "game-summary", "Completed: {completed} / {total}" }
        div { class: "challenge-grid",
            for card in cards {
                ChallengeCard { key: "{card.id}", card: card.clone(), on_intent }
            }
        }
        match dialog {
            DialogVm::Closed => rsx! {},
            DialogVm::Challenge { id, label, buttons } => rsx! {
                ChallengeDialog { id, label, buttons, on_intent }
            },
            DialogVm::Assessment { id, kind, title, items, clicked, required } => rsx! {
                AssessmentDialog { id, kind, title, items, clicked, required, on_intent }
            },
        }
    }
}

#[component]
fn ChallengeCard(card: ChallengeCardVm, on_intent: Callback<GameIntent>) -> Element {
    let class = if card.complete {
        "challenge-card complete"
    } else {
        "challenge-card"
    };
    let id = card.id;
    rsx! {
        div {
            class,
            onclick: move |_| on_intent.call(GameIntent::SelectChallenge(id)),
            "{card.label}"
        }
    }
}

#[component]
fn ChallengeDialog(
    id: ChallengeId,
    label: String,
    buttons: Vec<AssessmentButtonVm>,
    on_intent: Callback<GameIntent>,
) -> Element {
    rsx! {
        div { class: "dialog",
            div { class: "dialog-header",
                h2 { "{label}" }
                button {
                    class: "btn btn-close",
                    onclick: move |_| on_intent.call(GameIntent::CloseChallenge),
                    "Close"
                }
            }
            div { class: "assessment-buttons",
                for entry in buttons {
                    AssessmentButton { key: "{entry.kind}", id, entry: entry.clone(), on_intent }
                }
            }
        }
    }
}

#[component]
fn AssessmentDialog(
    id: ChallengeId,
    kind: AssessmentKind,
    title: &'static str,
    items: Vec<ItemButtonVm>,
    clicked: usize,
    required: usize,
    on_intent: Callback<GameIntent>,
) -> Element {
    rsx! {
        div { class: "dialog",
            div { class: "dialog-header",
                button {
                    class: "btn btn-back",
                    onclick: move |_| on_intent.call(GameIntent::CloseAssessment),
                    "Go Back"
                }
                h2 { "{title}" }
            }
            p { class: "assessment-progress", "{clicked} / {required}" }
            div { class: "item-buttons",
                for entry in items {
                    ItemButton { key: "{entry.item}", entry: entry.clone(), id, kind, on_intent }
                }
            }
        }
    }
}

#[component]
fn AssessmentButton(
    id: ChallengeId,
    entry: AssessmentButtonVm,
    on_intent: Callback<GameIntent>,
) -> Element {
    let kind = entry.kind;
    rsx! {
        button {
            class: entry.class(),
            disabled: !entry.enabled,
            onclick: move |_| on_intent.call(GameIntent::StartAssessment(id, kind)),
            "{entry.title}"
        }
    }
}

#[component]
fn ItemButton(
    entry: ItemButtonVm,
    id: ChallengeId,
    kind: AssessmentKind,
    on_intent: Callback<GameIntent>,
) -> Element {
    let class = if entry.clicked {
        "item-button clicked"
    } else {
        "item-button"
    };
    let item = entry.item;
    let label = item.to_string();
    rsx! {
        button {
            class,
            onclick: move |_| on_intent.call(GameIntent::ClickItem(id, kind, item.clone())),
            "{label}"
        }
    }
}
