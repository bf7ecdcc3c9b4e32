use dioxus::prelude::*;
use nurse_core::model::Identity;

use crate::context::AppContext;
use crate::views::{AuthView, GameView};

/// Track the provider's signed-in identity as a signal.
pub(crate) fn use_current_identity() -> Signal<Option<Identity>> {
    let ctx = use_context::<AppContext>();
    let provider = ctx.identity_provider();
    let identity = use_signal(|| provider.current());

    use_future(move || {
        let mut receiver = provider.watch();
        let mut identity = identity;
        async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                identity.set(next);
            }
        }
    });

    identity
}

/// Renders the game for a signed-in identity and the login form otherwise.
#[component]
pub fn SessionGate() -> Element {
    let identity = use_current_identity();

    match identity() {
        Some(identity) => {
            let key = identity.user_id().to_string();
            rsx! {
                GameView { key: "{key}", identity }
            }
        }
        None => rsx! {
            AuthView {}
        },
    }
}
