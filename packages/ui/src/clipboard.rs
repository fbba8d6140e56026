//! Browser clipboard access through `navigator.clipboard`.

use dioxus::prelude::*;
use store::clipboard::{copy_prompt, ClipboardError, ClipboardWriter};

use crate::icons::FaCopy;
use crate::toast::use_toasts;
use crate::Icon;

/// Multi-format write: one `ClipboardItem` with `text/html` and `text/plain`.
const WRITE_RICH_JS: &str = r#"(async function() {
    const [html, plain] = await dioxus.recv();
    try {
        const item = new ClipboardItem({
            'text/html': new Blob([html], { type: 'text/html' }),
            'text/plain': new Blob([plain], { type: 'text/plain' }),
        });
        await navigator.clipboard.write([item]);
        dioxus.send(null);
    } catch (e) {
        dioxus.send(String(e));
    }
})();"#;

const WRITE_TEXT_JS: &str = r#"(async function() {
    const text = await dioxus.recv();
    try {
        await navigator.clipboard.writeText(text);
        dioxus.send(null);
    } catch (e) {
        dioxus.send(String(e));
    }
})();"#;

/// [`ClipboardWriter`] over the page's `navigator.clipboard`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClipboard;

async fn run_write<T: serde::Serialize>(js: &str, args: T) -> Result<(), ClipboardError> {
    let mut eval = document::eval(js);
    eval.send(args)
        .map_err(|e| ClipboardError(e.to_string()))?;
    match eval.recv::<Option<String>>().await {
        Ok(None) => Ok(()),
        Ok(Some(reason)) => Err(ClipboardError(reason)),
        Err(e) => Err(ClipboardError(e.to_string())),
    }
}

impl ClipboardWriter for BrowserClipboard {
    async fn write_rich(&self, html: &str, plain: &str) -> Result<(), ClipboardError> {
        run_write(WRITE_RICH_JS, (html, plain)).await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        run_write(WRITE_TEXT_JS, text).await
    }
}

/// Copies `content` (editor HTML) and reports the outcome as a toast.
#[component]
pub fn CopyButton(
    content: String,
    #[props(default)] label: Option<String>,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let toasts = use_toasts();

    let onclick = move |evt: Event<MouseData>| {
        evt.stop_propagation();
        let content = content.clone();
        let toasts = toasts.clone();
        async move {
            let outcome = copy_prompt(&BrowserClipboard, &content).await;
            let (kind, message) = outcome.notice();
            toasts.show(kind, message);
        }
    };

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            title: "Copy to clipboard",
            onclick: onclick,
            Icon { icon: FaCopy, width: 14, height: 14 }
            if let Some(label) = label {
                span { "{label}" }
            }
        }
    }
}
