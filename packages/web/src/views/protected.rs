use dioxus::prelude::*;

use store::ListQuery;
use ui::views::RequireAuth;
use ui::Navbar;

use crate::Route;

/// Layout for every signed-in page: navbar over the routed content.
/// Without a session the user is sent to `/login`.
#[component]
pub fn Protected() -> Element {
    let nav = use_navigator();

    rsx! {
        RequireAuth {
            on_unauthenticated: move |_| {
                tracing::info!("No session, redirecting to login");
                nav.replace(Route::Login {});
            },
            Navbar {
                on_home: move |_| {
                    nav.push(Route::Prompts { query: ListQuery::default() });
                },
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
            }
            main {
                Outlet::<Route> {}
            }
        }
    }
}
