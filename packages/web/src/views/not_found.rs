use dioxus::prelude::*;

use store::ListQuery;
use ui::views::NotFoundView;

use crate::Route;

/// Any path no other route matches.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    use_hook(|| tracing::warn!("No route for /{}", segments.join("/")));
    let nav = use_navigator();

    rsx! {
        NotFoundView {
            on_home: move |_| {
                nav.push(Route::Prompts { query: ListQuery::default() });
            },
        }
    }
}
