use dioxus::prelude::*;

use crate::{use_auth, LoginButton};

/// Sign-in page. Calls `on_authenticated` once a session exists.
#[component]
pub fn LoginView(on_authenticated: EventHandler<()>) -> Element {
    let session = use_auth();

    use_effect(move || {
        if session.read().is_authenticated() {
            on_authenticated.call(());
        }
    });

    if session.read().is_loading() {
        return rsx! {
            div { class: "page-status", "Loading..." }
        };
    }

    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                h1 { "Prompt Library" }
                p { class: "muted", "Store, search and reuse your AI prompts." }
                LoginButton { class: "btn btn-primary login-button" }
            }
        }
    }
}
