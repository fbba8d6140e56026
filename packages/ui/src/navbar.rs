use dioxus::prelude::*;

use crate::{use_auth, LogoutButton};

/// Top bar: application name, signed-in user and logout.
#[component]
pub fn Navbar(on_home: EventHandler<()>, on_logout: EventHandler<()>) -> Element {
    let session = use_auth();
    let user = session.read().user().cloned();

    rsx! {
        header {
            class: "navbar",
            button {
                class: "navbar-brand",
                onclick: move |_| on_home.call(()),
                "Prompt Library"
            }
            if let Some(user) = user {
                div {
                    class: "navbar-user",
                    if let Some(picture) = user.picture_url.clone() {
                        img {
                            class: "avatar",
                            src: "{picture}",
                            alt: user.display_name().to_string(),
                        }
                    }
                    span { {user.display_name()} }
                    LogoutButton { class: "btn btn-ghost", on_logout }
                }
            }
        }
    }
}
