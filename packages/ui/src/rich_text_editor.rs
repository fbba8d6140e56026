use dioxus::prelude::*;

use crate::icons::{
    FaBold, FaCode, FaHeading, FaItalic, FaListOl, FaListUl, FaQuoteLeft, FaRotateLeft,
    FaRotateRight, FaUnderline,
};
use crate::Icon;

/// Counter for unique editor element ids.
static EDITOR_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Escape a string so it's safe to embed inside a JS string literal (double-quoted).
fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '<' => out.push_str("\\u003c"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A formatting command from the toolbar, run with `document.execCommand`.
#[derive(Clone, Copy, PartialEq)]
enum Command {
    Inline(&'static str),
    Block(&'static str),
}

impl Command {
    fn script(self, editor_id: &str) -> String {
        let (name, arg) = match self {
            Command::Inline(name) => (name, String::from("null")),
            Command::Block(tag) => ("formatBlock", js_string_escape(tag)),
        };
        format!(
            r#"(function() {{
                var el = document.getElementById({eid_js});
                if (!el) return;
                el.focus();
                document.execCommand({name_js}, false, {arg});
                el.dispatchEvent(new Event('input'));
            }})();"#,
            eid_js = js_string_escape(editor_id),
            name_js = js_string_escape(name),
        )
    }
}

/// `contenteditable` rich text editor producing HTML.
///
/// `content` is both the initial value and the live value: edits are pushed
/// into it (and to `on_change`), and outside changes, such as a record
/// finishing its load, are written back into the editable element.
#[component]
pub fn RichTextEditor(
    mut content: Signal<String>,
    #[props(default)] on_change: EventHandler<String>,
    #[props(default = "Write something...".to_string())] placeholder: String,
) -> Element {
    let editor_id = use_signal(|| {
        let n = EDITOR_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        format!("rich-editor-{n}")
    });
    // Last HTML exchanged with the element, to avoid echo loops.
    let mut last_pushed = use_signal(String::new);

    // ── Input bridge: long-lived eval that forwards every edit ──
    use_effect(move || {
        let eid = editor_id.peek().clone();
        spawn(async move {
            let bridge_js = format!(
                r#"(function() {{
                    var el = document.getElementById({eid_js});
                    if (!el) return;
                    el.addEventListener('input', function() {{
                        dioxus.send(el.innerHTML);
                    }});
                }})();"#,
                eid_js = js_string_escape(&eid),
            );
            let mut eval = document::eval(&bridge_js);
            while let Ok(html) = eval.recv::<String>().await {
                last_pushed.set(html.clone());
                content.set(html.clone());
                on_change.call(html);
            }
        });
    });

    // ── Sync outside content changes into the element ──
    use_effect(move || {
        let html = content();
        if html == *last_pushed.peek() {
            return;
        }
        last_pushed.set(html.clone());

        let eid = editor_id.peek().clone();
        let js = format!(
            r#"(function() {{
                var el = document.getElementById({eid_js});
                if (!el || el.innerHTML === {html_js}) return;
                el.innerHTML = {html_js};
            }})();"#,
            eid_js = js_string_escape(&eid),
            html_js = js_string_escape(&html),
        );
        document::eval(&js);
    });

    let eid = editor_id();
    let run = move |command: Command| {
        let eid = editor_id.peek().clone();
        move |evt: Event<MouseData>| {
            // Keep the selection inside the editor.
            evt.prevent_default();
            document::eval(&command.script(&eid));
        }
    };

    rsx! {
        div {
            class: "rich-editor",
            div {
                class: "rich-editor-toolbar",
                button { r#type: "button", title: "Bold", onmousedown: run(Command::Inline("bold")),
                    Icon { icon: FaBold, width: 14, height: 14 }
                }
                button { r#type: "button", title: "Italic", onmousedown: run(Command::Inline("italic")),
                    Icon { icon: FaItalic, width: 14, height: 14 }
                }
                button { r#type: "button", title: "Underline", onmousedown: run(Command::Inline("underline")),
                    Icon { icon: FaUnderline, width: 14, height: 14 }
                }
                span { class: "rich-editor-divider" }
                button { r#type: "button", title: "Heading 1", onmousedown: run(Command::Block("H1")),
                    Icon { icon: FaHeading, width: 14, height: 14 }
                    "1"
                }
                button { r#type: "button", title: "Heading 2", onmousedown: run(Command::Block("H2")),
                    Icon { icon: FaHeading, width: 14, height: 14 }
                    "2"
                }
                button { r#type: "button", title: "Heading 3", onmousedown: run(Command::Block("H3")),
                    Icon { icon: FaHeading, width: 14, height: 14 }
                    "3"
                }
                span { class: "rich-editor-divider" }
                button { r#type: "button", title: "Bullet List", onmousedown: run(Command::Inline("insertUnorderedList")),
                    Icon { icon: FaListUl, width: 14, height: 14 }
                }
                button { r#type: "button", title: "Ordered List", onmousedown: run(Command::Inline("insertOrderedList")),
                    Icon { icon: FaListOl, width: 14, height: 14 }
                }
                button { r#type: "button", title: "Quote", onmousedown: run(Command::Block("BLOCKQUOTE")),
                    Icon { icon: FaQuoteLeft, width: 14, height: 14 }
                }
                button { r#type: "button", title: "Code Block", onmousedown: run(Command::Block("PRE")),
                    Icon { icon: FaCode, width: 14, height: 14 }
                }
                span { class: "rich-editor-divider" }
                button { r#type: "button", title: "Undo", onmousedown: run(Command::Inline("undo")),
                    Icon { icon: FaRotateLeft, width: 14, height: 14 }
                }
                button { r#type: "button", title: "Redo", onmousedown: run(Command::Inline("redo")),
                    Icon { icon: FaRotateRight, width: 14, height: 14 }
                }
            }
            div {
                id: "{eid}",
                class: "rich-editor-content",
                contenteditable: "true",
                "data-placeholder": "{placeholder}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escape() {
        assert_eq!(js_string_escape("a\"b\\c\nd"), r#""a\"b\\c\nd""#);
        assert_eq!(js_string_escape("</script>"), r#""\u003c/script>""#);
    }

    #[test]
    fn test_block_command_script() {
        let js = Command::Block("H1").script("rich-editor-0");
        assert!(js.contains(r#"document.execCommand("formatBlock", false, "H1")"#));
        assert!(js.contains(r#"getElementById("rich-editor-0")"#));
    }
}
