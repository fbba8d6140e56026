use dioxus::prelude::*;

use store::ListQuery;
use ui::views::PromptListView;

use crate::Route;

/// `/`: the library list, its filters carried in the query string.
#[component]
pub fn Prompts(query: ListQuery) -> Element {
    let nav = use_navigator();

    rsx! {
        PromptListView {
            query,
            on_navigate: move |next: ListQuery| {
                nav.push(Route::Prompts { query: next });
            },
            on_replace: move |next: ListQuery| {
                nav.replace(Route::Prompts { query: next });
            },
            on_open: move |id: String| {
                nav.push(Route::PromptDetail { id });
            },
            on_create: move |_| {
                nav.push(Route::PromptNew {});
            },
        }
    }
}
