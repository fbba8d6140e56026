//! Login page.

use dioxus::prelude::*;

use store::ListQuery;
use ui::views::LoginView;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_authenticated: move |_| {
                nav.replace(Route::Prompts { query: ListQuery::default() });
            },
        }
    }
}
