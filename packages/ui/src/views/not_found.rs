use dioxus::prelude::*;

/// Catch-all page for unknown routes.
#[component]
pub fn NotFoundView(on_home: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h1 { class: "not-found-code", "404" }
            p { "Page not found" }
            button {
                class: "btn-link",
                onclick: move |_| on_home.call(()),
                "Go back to library"
            }
        }
    }
}
