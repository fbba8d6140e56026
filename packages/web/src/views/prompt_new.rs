use dioxus::prelude::*;

use store::{EditorMode, ListQuery};
use ui::views::PromptEditorView;

use crate::Route;

/// `/new`: blank editor. The first save moves to the created record.
#[component]
pub fn PromptNew() -> Element {
    let nav = use_navigator();

    rsx! {
        PromptEditorView {
            mode: EditorMode::Create,
            on_back: move |_| {
                nav.push(Route::Prompts { query: ListQuery::default() });
            },
            on_created: move |id: String| {
                tracing::info!("Created prompt {id}");
                nav.replace(Route::PromptDetail { id });
            },
            on_deleted: move |_| {
                nav.push(Route::Prompts { query: ListQuery::default() });
            },
        }
    }
}
