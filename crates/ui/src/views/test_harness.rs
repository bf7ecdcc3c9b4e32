use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use nurse_core::model::Identity;
use services::{AppServices, IdentityProvider, ProgressService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::game::{Board, GameIntent, use_game_dispatcher, use_game_session};
use crate::views::gate::use_current_identity;
use crate::views::{AuthView, SessionGate};
use crate::vm::map_board;

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.services.identity()
    }

    fn progress_service(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Gate,
    Auth,
    /// The game board without its header; the dispatcher is exposed
    /// through [`ViewHarness::dispatch`].
    Intents,
}

#[derive(Clone, Default)]
pub struct HarnessHandles {
    dispatch: Rc<RefCell<Option<Callback<GameIntent>>>>,
}

impl PartialEq for HarnessHandles {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dispatch, &other.dispatch)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Gate => rsx! { SessionGate {} },
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::Intents => rsx! { IntentGate { handles: props.handles.clone() } },
    }
}

#[component]
fn IntentGate(handles: HarnessHandles) -> Element {
    let identity = use_current_identity();
    match identity() {
        Some(identity) => {
            let key = identity.user_id().to_string();
            rsx! { IntentBoard { key: "{key}", identity, handles } }
        }
        None => rsx! { p { class: "signed-out", "Signed out" } },
    }
}

#[component]
fn IntentBoard(identity: Identity, handles: HarnessHandles) -> Element {
    let game = use_game_session(identity);
    let dispatch = use_game_dispatcher(game.session);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *handles.dispatch.borrow_mut() = Some(dispatch);
    }

    let board = game.session.read().as_ref().map(|g| map_board(g.state()));
    match board {
        Some(board) => rsx! { Board { board, on_intent: dispatch } },
        None => rsx! { p { "Loading progress..." } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
    handles: HarnessHandles,
}

impl ViewHarness {
    pub fn dispatch(&self) -> Callback<GameIntent> {
        let registered = *self.handles.dispatch.borrow();
        registered.expect("dispatch registered")
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(&storage);
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        services,
        handles,
    }
}
