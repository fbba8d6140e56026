//! Authentication context and hooks for the UI.

use api::{ApiError, HttpClient};
use dioxus::prelude::*;
use store::session::{fetch_user, sign_out};
use store::Session;

use crate::client::{page_origin, use_client, use_library_config};

/// Get the current session.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Clear the session when a request came back 401.
pub fn observe_api_error(mut session: Signal<Session>, err: &ApiError) {
    session.write().observe(err);
}

/// Ask the server again who is signed in and update `session` with the answer.
/// The current user stays visible until the answer arrives.
pub fn refetch_session(client: HttpClient, mut session: Signal<Session>) -> Task {
    spawn(async move {
        let user = fetch_user(&client).await;
        session.write().resolve(user);
    })
}

/// Provider component that manages the session.
/// Asks the server who is signed in once, on mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_client();
    let session = use_signal(Session::default);

    use_hook(move || refetch_session(client, session));

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button that starts the external Google sign-in.
#[component]
pub fn LoginButton(
    #[props(default = "Sign in with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let config = use_library_config();
    let mut redirecting = use_signal(|| false);

    let onclick = move |_| {
        let url = format!("{}{}", page_origin(), config.api.login_path);
        tracing::info!("Redirecting to sign-in");
        redirecting.set(true);
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&url) {
                    tracing::error!("Failed to start sign-in: {e:?}");
                    redirecting.set(false);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("Sign-in needs a browser; open {url}");
            redirecting.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: redirecting(),
            onclick: onclick,
            if redirecting() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to sign out. The local session is cleared even if the server call
/// fails; `on_logout` runs afterwards.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut session = use_auth();
    let client = use_client();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            sign_out(&client).await;
            session.write().clear();
            tracing::info!("Signed out");
            on_logout.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
