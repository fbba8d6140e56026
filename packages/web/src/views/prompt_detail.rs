use dioxus::prelude::*;

use store::{EditorMode, ListQuery};
use ui::views::PromptEditorView;

use crate::Route;

/// `/:id`: edit an existing record.
#[component]
pub fn PromptDetail(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        PromptEditorView {
            mode: EditorMode::Edit { id },
            on_back: move |_| {
                nav.push(Route::Prompts { query: ListQuery::default() });
            },
            on_created: move |id: String| {
                nav.replace(Route::PromptDetail { id });
            },
            on_deleted: move |_| {
                tracing::info!("Prompt deleted, back to library");
                nav.replace(Route::Prompts { query: ListQuery::default() });
            },
        }
    }
}
