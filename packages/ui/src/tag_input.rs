use dioxus::prelude::*;
use store::{PromptForm, TagKey};

use crate::icons::FaXmark;
use crate::Icon;

/// Tag chips plus an input with autocomplete against the library's tags.
#[component]
pub fn TagInput(mut form: Signal<PromptForm>) -> Element {
    let tags = form.read().tags().to_vec();
    let input = form.read().tag_input().to_string();
    let suggestions: Vec<String> = form
        .read()
        .visible_suggestions()
        .into_iter()
        .map(str::to_string)
        .collect();

    let onkeydown = move |evt: KeyboardEvent| {
        let key = match evt.key() {
            Key::Enter => TagKey::Enter,
            Key::Backspace => TagKey::Backspace,
            Key::Escape => TagKey::Escape,
            _ => return,
        };
        if form.write().tag_key(key) {
            evt.prevent_default();
        }
    };

    rsx! {
        div {
            class: "tag-input",
            for tag in tags {
                span {
                    key: "{tag}",
                    class: "chip",
                    "{tag}"
                    button {
                        r#type: "button",
                        class: "chip-remove",
                        title: "Remove",
                        onclick: {
                            let tag = tag.clone();
                            move |_| {
                                form.write().remove_tag(&tag);
                            }
                        },
                        Icon { icon: FaXmark, width: 10, height: 10 }
                    }
                }
            }
            input {
                class: "tag-input-field",
                r#type: "text",
                placeholder: "Add tags...",
                value: "{input}",
                oninput: move |evt: FormEvent| form.write().set_tag_input(&evt.value()),
                onkeydown: onkeydown,
            }
            if !suggestions.is_empty() {
                ul {
                    class: "tag-suggestions",
                    for suggestion in suggestions {
                        li {
                            key: "{suggestion}",
                            // mousedown fires before the input loses focus
                            onmousedown: {
                                let suggestion = suggestion.clone();
                                move |evt: Event<MouseData>| {
                                    evt.prevent_default();
                                    form.write().add_tag(&suggestion);
                                }
                            },
                            "{suggestion}"
                        }
                    }
                }
            }
        }
    }
}
