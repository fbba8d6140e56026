use dioxus::prelude::*;
use store::editor::{self, known_tags};
use store::{DeleteDialog, EditorMode, LoadError, PromptForm, SaveError};

use crate::icons::{FaArrowLeft, FaTrashCan};
use crate::views::ConfirmDialog;
use crate::{
    observe_api_error, use_auth, use_client, use_flash, use_toasts, CopyButton, Icon,
    RichTextEditor, TagInput,
};

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed(LoadError),
}

/// Create or edit one prompt.
///
/// Create mode starts blank and calls `on_created` with the new id after the
/// first save. Edit mode loads the record by id; a missing record shows
/// "Prompt not found" instead of the form. A confirmed delete leaves a toast
/// for the list and calls `on_deleted`.
#[component]
pub fn PromptEditorView(
    mode: EditorMode,
    on_back: EventHandler<()>,
    on_created: EventHandler<String>,
    on_deleted: EventHandler<()>,
) -> Element {
    let client = use_client();
    let session = use_auth();
    let toasts = use_toasts();
    let mut flash = use_flash();

    // Track the mode in a signal so the loader re-runs on route param change
    let mut mode_signal = use_signal(|| mode.clone());
    if *mode_signal.peek() != mode {
        mode_signal.set(mode.clone());
    }

    let mut form = use_signal(PromptForm::new);
    let mut content = use_signal(String::new);
    // Edit mode starts in Loading so the empty form never flashes
    let mut load_state = use_signal(|| {
        if mode.needs_load() {
            LoadState::Loading
        } else {
            LoadState::Ready
        }
    });
    let mut saving = use_signal(|| false);
    let mut dialog = use_signal(DeleteDialog::default);

    // Autocomplete source, once. Failures leave suggestions empty.
    {
        let client = client.clone();
        use_future(move || {
            let client = client.clone();
            async move {
                let tags = known_tags(&client).await;
                form.write().set_known_tags(tags);
            }
        });
    }

    // Load the record whenever the route points at another one
    {
        let client = client.clone();
        use_effect(move || {
            let mode = mode_signal();
            dialog.set(DeleteDialog::default());
            match mode {
                EditorMode::Create => {
                    form.write().reset(None);
                    content.set(String::new());
                    load_state.set(LoadState::Ready);
                }
                EditorMode::Edit { id } => {
                    load_state.set(LoadState::Loading);
                    let client = client.clone();
                    spawn(async move {
                        let result = editor::load(&client, &id).await;
                        let still_current =
                            matches!(&*mode_signal.peek(), EditorMode::Edit { id: current } if *current == id);
                        if !still_current {
                            return;
                        }
                        match result {
                            Ok(prompt) => {
                                form.write().reset(Some(&prompt));
                                content.set(prompt.content);
                                load_state.set(LoadState::Ready);
                            }
                            Err(e) => {
                                tracing::error!("Failed to load prompt {id}: {e}");
                                if let LoadError::Failed(err) = &e {
                                    observe_api_error(session, err);
                                }
                                load_state.set(LoadState::Failed(e));
                            }
                        }
                    });
                }
            }
        });
    }

    let on_save = {
        let client = client.clone();
        move |_: MouseEvent| {
            let client = client.clone();
            let toasts = toasts.clone();
            async move {
                if saving() {
                    return;
                }
                let mode = mode_signal.peek().clone();
                let snapshot = form.peek().clone();
                saving.set(true);
                match editor::save(&client, &mode, &snapshot).await {
                    Ok(saved) => {
                        toasts.success(mode.saved_message());
                        if mode == EditorMode::Create {
                            on_created.call(saved.id);
                        }
                    }
                    Err(SaveError::TitleRequired) => {
                        toasts.error(SaveError::TitleRequired.to_string());
                    }
                    Err(SaveError::Api(e)) => {
                        tracing::error!("Failed to save prompt: {e}");
                        observe_api_error(session, &e);
                        toasts.error(e.to_string());
                    }
                }
                saving.set(false);
            }
        }
    };

    let on_confirm_delete = move |_: ()| {
        let client = client.clone();
        async move {
            let EditorMode::Edit { id } = mode_signal.peek().clone() else {
                return;
            };
            if !dialog.write().begin() {
                return;
            }
            match editor::delete(&client, &id).await {
                Ok(notice) => {
                    dialog.write().finish();
                    flash.write().put(notice);
                    on_deleted.call(());
                }
                Err(e) => {
                    tracing::error!("Failed to delete prompt {id}: {e}");
                    observe_api_error(session, &e);
                    dialog.write().fail(&e);
                }
            }
        }
    };

    let state = load_state();
    match state {
        LoadState::Loading => {
            return rsx! {
                div { class: "page-status", "Loading prompt..." }
            };
        }
        LoadState::Failed(err) => {
            return rsx! {
                div {
                    class: "page-status",
                    div { class: "page-error", "{err}" }
                    button {
                        class: "btn-link",
                        onclick: move |_| on_back.call(()),
                        "Back to library"
                    }
                }
            };
        }
        LoadState::Ready => {}
    }

    let editing = matches!(mode, EditorMode::Edit { .. });
    let is_saving = saving();
    let title = form.read().title.clone();
    let category = form.read().category.clone();
    let current_content = content();
    let delete_state = dialog();
    let placeholder = if editing {
        "View or edit your prompt with full formatting support."
    } else {
        "Write your prompt here... Formatter is compatible with ChatGPT, Word, and Apple Notes."
    };

    rsx! {
        div {
            class: "editor-page",
            div {
                class: "editor-header",
                button {
                    class: "btn-link",
                    onclick: move |_| on_back.call(()),
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    "Back to library"
                }
                div {
                    class: "editor-actions",
                    if editing {
                        CopyButton {
                            content: current_content,
                            label: "Copy Prompt".to_string(),
                            class: "btn btn-secondary",
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: is_saving,
                        onclick: on_save,
                        if is_saving {
                            "Saving..."
                        } else if editing {
                            "Save"
                        } else {
                            "Create Prompt"
                        }
                    }
                    if editing {
                        button {
                            class: "btn btn-danger",
                            onclick: move |_| dialog.write().open(),
                            Icon { icon: FaTrashCan, width: 14, height: 14 }
                            "Delete"
                        }
                    }
                }
            }

            if delete_state.is_open() {
                ConfirmDialog {
                    title: "Delete Prompt",
                    confirm_label: "Delete",
                    busy_label: "Deleting...",
                    busy: delete_state.is_deleting(),
                    error: delete_state.error().map(str::to_string),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| {
                        dialog.write().close();
                    },
                    p {
                        "Are you sure you want to delete "
                        strong { "{title}" }
                        "? This action cannot be undone."
                    }
                }
            }

            div {
                class: "editor-fields",
                label {
                    class: "field",
                    span { class: "field-label", "Title" }
                    input {
                        r#type: "text",
                        placeholder: "Enter prompt title...",
                        value: "{title}",
                        oninput: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                }
                label {
                    class: "field",
                    span { class: "field-label", "Category" }
                    input {
                        r#type: "text",
                        placeholder: "Enter category...",
                        value: "{category}",
                        oninput: move |evt: FormEvent| form.write().category = evt.value(),
                    }
                }
                div {
                    class: "field",
                    span { class: "field-label", "Tags" }
                    TagInput { form }
                }
            }

            div {
                class: "field editor-content",
                span { class: "field-label", "Content" }
                RichTextEditor {
                    content,
                    placeholder: placeholder.to_string(),
                    on_change: move |html: String| form.write().content = html,
                }
            }
        }
    }
}
