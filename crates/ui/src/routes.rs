use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::SessionGate;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", SessionGate)] Play {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}
