use dioxus::prelude::*;

use crate::use_auth;

/// Renders `children` only for a signed-in user. Once the session is known
/// to be empty, `on_unauthenticated` runs (the web app sends it to `/login`).
#[component]
pub fn RequireAuth(on_unauthenticated: EventHandler<()>, children: Element) -> Element {
    let session = use_auth();

    use_effect(move || {
        let session = session.read();
        if !session.is_loading() && !session.is_authenticated() {
            on_unauthenticated.call(());
        }
    });

    let (loading, authenticated) = {
        let session = session.read();
        (session.is_loading(), session.is_authenticated())
    };

    if loading {
        return rsx! {
            div { class: "page-status", "Loading..." }
        };
    }
    if !authenticated {
        return rsx! {};
    }

    rsx! {
        {children}
    }
}
