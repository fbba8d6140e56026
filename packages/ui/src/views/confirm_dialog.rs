use dioxus::prelude::*;

use crate::icons::FaTriangleExclamation;
use crate::Icon;

/// Modal confirmation for a destructive action.
///
/// Clicking the backdrop or "Cancel" calls `on_cancel`, except while `busy`:
/// an action in flight cannot be dismissed. `error` is shown inline.
#[component]
pub fn ConfirmDialog(
    title: String,
    confirm_label: String,
    busy_label: String,
    busy: bool,
    #[props(default)] error: Option<String>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| {
                if !busy {
                    on_cancel.call(());
                }
            },
            div {
                class: "modal",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-body",
                    div {
                        class: "modal-icon",
                        Icon { icon: FaTriangleExclamation, width: 18, height: 18 }
                    }
                    div {
                        h3 { "{title}" }
                        {children}
                        if let Some(error) = error {
                            p { class: "form-error", "{error}" }
                        }
                    }
                }
                div {
                    class: "modal-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "{busy_label}" } else { "{confirm_label}" }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
