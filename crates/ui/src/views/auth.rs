use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{AuthAction, AuthVm, submit_auth};

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let provider = ctx.identity_provider();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let vm = use_signal(AuthVm::default);

    let submit = use_callback(move |action: AuthAction| {
        let provider = provider.clone();
        let mut vm = vm;
        if vm.read().is_busy() {
            return;
        }
        vm.write().begin();
        let email = email();
        let password = password();
        spawn(async move {
            let result = submit_auth(provider.as_ref(), action, &email, &password).await;
            vm.write().finish(&result);
        });
    });

    let busy = vm.read().is_busy();
    let error = vm.read().error().map(str::to_owned);

    rsx! {
        div { class: "auth",
            h2 { "Login / Register" }
            input {
                class: "auth-input",
                r#type: "email",
                placeholder: "Email",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            input {
                class: "auth-input",
                r#type: "password",
                placeholder: "Password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            button {
                id: "auth-login",
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| submit.call(AuthAction::Login),
                "Login"
            }
            button {
                id: "auth-register",
                class: "btn btn-secondary",
                disabled: busy,
                onclick: move |_| submit.call(AuthAction::Register),
                "Register"
            }
            if let Some(error) = error {
                p { class: "auth-error", "{error}" }
            }
        }
    }
}
