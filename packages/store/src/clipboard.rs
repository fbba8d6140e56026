//! Copying a prompt to the clipboard.
//!
//! A copy writes two representations in one clipboard item: the editor HTML
//! (`text/html`, for Word, Notes and other rich targets) and a Markdown
//! rendering (`text/plain`, for pasting into LLM chats). If the browser
//! refuses the rich write, the HTML is stripped of tags and written as plain
//! text instead.

use std::future::Future;
use std::sync::LazyLock;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use regex::Regex;
use thiserror::Error;

use crate::toast::ToastKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Destination of a copy. Implemented over `navigator.clipboard` in the UI.
pub trait ClipboardWriter {
    /// One clipboard item holding both `text/html` and `text/plain`.
    fn write_rich(&self, html: &str, plain: &str)
        -> impl Future<Output = Result<(), ClipboardError>>;

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Rich,
    PlainText,
    Failed,
}

impl CopyOutcome {
    /// The toast to show for this outcome.
    pub fn notice(self) -> (ToastKind, &'static str) {
        match self {
            CopyOutcome::Rich => (
                ToastKind::Success,
                "Copied! Formatted for Word/Notes and Markdown for LLMs.",
            ),
            CopyOutcome::PlainText => (ToastKind::Success, "Copied as plain text"),
            CopyOutcome::Failed => (ToastKind::Error, "Failed to copy to clipboard"),
        }
    }
}

/// Copy `html` as HTML plus Markdown, falling back to stripped plain text.
pub async fn copy_prompt<C: ClipboardWriter>(clipboard: &C, html: &str) -> CopyOutcome {
    let markdown = html_to_markdown(html);
    match clipboard.write_rich(html, &markdown).await {
        Ok(()) => CopyOutcome::Rich,
        Err(e) => {
            tracing::warn!("Rich copy failed, falling back to plain text: {e}");
            match clipboard.write_text(&strip_markup(html)).await {
                Ok(()) => CopyOutcome::PlainText,
                Err(e) => {
                    tracing::error!("Failed to copy: {e}");
                    CopyOutcome::Failed
                }
            }
        }
    }
}

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("markup pattern is valid"));

/// Remove every tag, leaving text and entities as they are.
pub fn strip_markup(html: &str) -> String {
    MARKUP.replace_all(html, "").into_owned()
}

/// Render editor HTML as Markdown.
pub fn html_to_markdown(html: &str) -> String {
    let mut queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(html));
    let mut tokenizer = Tokenizer::new(MarkdownSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();
    tokenizer.sink.finish()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered(u64),
}

/// Token sink that writes Markdown as tags and text stream by.
#[derive(Debug)]
struct MarkdownSink {
    out: String,
    /// Newlines owed before the next content: 1 for a line, 2 for a block.
    pending: Option<usize>,
    at_line_start: bool,
    /// A list marker was just written and no content followed yet.
    after_marker: bool,
    quote_depth: usize,
    lists: Vec<ListKind>,
    links: Vec<Option<String>>,
    /// Open emphasis markers and the output length right after each one.
    emphasis: Vec<(&'static str, usize)>,
    skip_depth: usize,
    in_pre: bool,
    fence_open: bool,
    fence_lang: String,
}

impl Default for MarkdownSink {
    fn default() -> Self {
        Self {
            out: String::new(),
            pending: None,
            at_line_start: true,
            after_marker: false,
            quote_depth: 0,
            lists: Vec::new(),
            links: Vec::new(),
            emphasis: Vec::new(),
            skip_depth: 0,
            in_pre: false,
            fence_open: false,
            fence_lang: String::new(),
        }
    }
}

impl TokenSink for MarkdownSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => self.tag(tag),
            Token::CharacterTokens(text) => self.text(&text),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

fn attr(tag: &Tag, name: &str) -> Option<String> {
    tag.attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
}

impl MarkdownSink {
    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }

    fn quote_prefix(&self) -> String {
        "> ".repeat(self.quote_depth)
    }

    /// Prefix of a new line: quote markers plus list continuation indent.
    fn line_prefix(&self) -> String {
        format!("{}{}", self.quote_prefix(), "    ".repeat(self.lists.len()))
    }

    fn block(&mut self, newlines: usize) {
        if self.after_marker {
            return;
        }
        self.pending = Some(self.pending.map_or(newlines, |n| n.max(newlines)));
    }

    /// Separator between paragraphs: a blank line, or a plain line break
    /// inside list items so that lists stay tight.
    fn paragraph_break(&mut self) {
        let newlines = if self.lists.is_empty() { 2 } else { 1 };
        self.block(newlines);
    }

    fn flush_pending(&mut self) {
        let Some(newlines) = self.pending.take() else {
            return;
        };
        if self.out.is_empty() {
            return;
        }
        let kept = self.out.trim_end_matches([' ', '\t', '\n']).len();
        self.out.truncate(kept);
        self.out.push('\n');
        for _ in 1..newlines {
            let blank = self.quote_prefix();
            self.out.push_str(blank.trim_end());
            self.out.push('\n');
        }
        self.at_line_start = true;
    }

    fn write(&mut self, text: &str) {
        self.flush_pending();
        if self.at_line_start {
            let prefix = self.line_prefix();
            self.out.push_str(&prefix);
            self.at_line_start = false;
        }
        self.after_marker = false;
        self.out.push_str(text);
    }

    fn list_item(&mut self) {
        self.after_marker = false;
        self.block(1);
        self.flush_pending();
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(ListKind::Ordered(n)) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
            _ => "- ".to_string(),
        };
        let indent = format!("{}{}", self.quote_prefix(), "    ".repeat(depth));
        self.out.push_str(&indent);
        self.out.push_str(&marker);
        self.at_line_start = false;
        self.after_marker = true;
    }

    fn line_break(&mut self) {
        if self.in_pre {
            self.out.push('\n');
            return;
        }
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn open_fence(&mut self) {
        if self.fence_open {
            return;
        }
        let fence = format!("```{}", self.fence_lang);
        self.write(&fence);
        self.out.push('\n');
        self.fence_open = true;
    }

    fn open_emphasis(&mut self, marker: &'static str) {
        self.write(marker);
        self.emphasis.push((marker, self.out.len()));
    }

    /// Close the innermost emphasis. Whitespace at the end of the emphasized
    /// text moves outside the marker; an emphasis with no text is dropped.
    fn close_emphasis(&mut self) {
        let Some((marker, opened_at)) = self.emphasis.pop() else {
            return;
        };
        let content_end = self.out.trim_end_matches(' ').len();
        let trailing_space = content_end < self.out.len();
        if content_end <= opened_at {
            self.out.truncate(opened_at - marker.len());
        } else {
            self.out.truncate(content_end);
            self.out.push_str(marker);
        }
        if trailing_space && !self.out.ends_with(' ') {
            self.out.push(' ');
        }
    }

    /// Text starting with a space right after an opening marker: put the
    /// space in front of the marker instead.
    fn hoist_space_before_marker(&mut self) {
        let Some((marker, opened_at)) = self.emphasis.last_mut() else {
            return;
        };
        if *opened_at != self.out.len() {
            return;
        }
        let marker_at = *opened_at - marker.len();
        let needs_space = marker_at > 0 && !self.out[..marker_at].ends_with([' ', '\n']);
        if needs_space {
            self.out.insert(marker_at, ' ');
            *opened_at += 1;
        }
    }

    fn tag(&mut self, tag: Tag) {
        let name: &str = &tag.name;
        let start = tag.kind == TagKind::StartTag;

        if matches!(name, "script" | "style" | "head" | "title") {
            if start && !tag.self_closing {
                self.skip_depth += 1;
            } else if !start {
                self.skip_depth = self.skip_depth.saturating_sub(1);
            }
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        if self.in_pre && name != "pre" {
            if start && name == "code" {
                if let Some(lang) = attr(&tag, "class")
                    .and_then(|c| c.strip_prefix("language-").map(str::to_string))
                {
                    self.fence_lang = lang;
                }
            } else if start && name == "br" {
                self.open_fence();
                self.line_break();
            }
            return;
        }

        match (name, start) {
            ("p" | "div", _) => self.paragraph_break(),
            ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", true) => {
                self.block(2);
                let level = name[1..].parse::<usize>().unwrap_or(1);
                self.write(&format!("{} ", "#".repeat(level)));
            }
            ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", false) => self.block(2),
            ("br", true) => self.line_break(),
            ("hr", true) => {
                self.block(2);
                self.write("---");
                self.block(2);
            }
            ("strong" | "b", true) => self.open_emphasis("**"),
            ("em" | "i", true) => self.open_emphasis("_"),
            ("s" | "del" | "strike", true) => self.open_emphasis("~~"),
            ("strong" | "b" | "em" | "i" | "s" | "del" | "strike", false) => {
                self.close_emphasis()
            }
            ("code", _) => self.write("`"),
            ("blockquote", true) => {
                self.block(2);
                self.quote_depth += 1;
            }
            ("blockquote", false) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.block(2);
            }
            ("ul" | "ol", true) => {
                if self.lists.is_empty() {
                    self.block(2);
                } else {
                    self.block(1);
                }
                self.lists.push(if name == "ol" {
                    let first = attr(&tag, "start")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(1);
                    ListKind::Ordered(first)
                } else {
                    ListKind::Bullet
                });
            }
            ("ul" | "ol", false) => {
                self.after_marker = false;
                self.lists.pop();
                if self.lists.is_empty() {
                    self.block(2);
                } else {
                    self.block(1);
                }
            }
            ("li", true) => self.list_item(),
            ("li", false) => {
                self.after_marker = false;
                self.block(1);
            }
            ("a", true) => {
                let href = attr(&tag, "href").filter(|h| !h.is_empty());
                if href.is_some() {
                    self.write("[");
                }
                self.links.push(href);
            }
            ("a", false) => {
                if let Some(Some(href)) = self.links.pop() {
                    self.write(&format!("]({href})"));
                }
            }
            ("img", true) => {
                if let Some(src) = attr(&tag, "src") {
                    let alt = attr(&tag, "alt").unwrap_or_default();
                    self.write(&format!("![{alt}]({src})"));
                }
            }
            ("pre", true) => {
                self.block(2);
                self.in_pre = true;
                self.fence_open = false;
                self.fence_lang.clear();
            }
            ("pre", false) => {
                self.open_fence();
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
                self.out.push_str(&self.quote_prefix());
                self.out.push_str("```");
                self.in_pre = false;
                self.block(2);
            }
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        if self.skip_depth > 0 {
            return;
        }
        if self.in_pre {
            self.open_fence();
            self.out.push_str(raw);
            return;
        }

        let mut collapsed = String::with_capacity(raw.len());
        let mut last_space = false;
        for ch in raw.chars() {
            if ch.is_whitespace() {
                if !last_space {
                    collapsed.push(' ');
                }
                last_space = true;
            } else {
                collapsed.push(ch);
                last_space = false;
            }
        }

        if collapsed.starts_with(' ') {
            self.hoist_space_before_marker();
        }
        let just_opened = self
            .emphasis
            .last()
            .is_some_and(|(_, opened_at)| *opened_at == self.out.len());
        let line_start = self.at_line_start || self.pending.is_some() || self.after_marker;
        let text = if line_start || just_opened || self.out.ends_with(' ') {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        if !text.is_empty() {
            self.write(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakeClipboard {
        rich_fails: bool,
        text_fails: bool,
        writes: RefCell<Vec<String>>,
    }

    impl ClipboardWriter for FakeClipboard {
        async fn write_rich(&self, html: &str, plain: &str) -> Result<(), ClipboardError> {
            if self.rich_fails {
                return Err(ClipboardError("NotAllowedError".to_string()));
            }
            self.writes.borrow_mut().push(format!("rich:{html}|{plain}"));
            Ok(())
        }

        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.text_fails {
                return Err(ClipboardError("NotAllowedError".to_string()));
            }
            self.writes.borrow_mut().push(format!("text:{text}"));
            Ok(())
        }
    }

    #[test]
    fn test_headings_and_inline_marks() {
        let md = html_to_markdown("<h1>Title</h1><p>Hello <strong>bold</strong> and <em>it</em></p>");
        assert_eq!(md, "# Title\n\nHello **bold** and _it_");
    }

    #[test]
    fn test_emphasis_keeps_spaces_outside_markers() {
        assert_eq!(html_to_markdown("<p><strong>bold </strong>next</p>"), "**bold** next");
        assert_eq!(html_to_markdown("<p>a<em> word</em></p>"), "a _word_");
        assert_eq!(
            html_to_markdown("<p>x <del> gone </del>y</p>"),
            "x ~~gone~~ y"
        );
        assert_eq!(html_to_markdown("<p>x <b> </b>y</p>"), "x y");
    }

    #[test]
    fn test_lists() {
        let md = html_to_markdown(
            "<ul><li><p>one</p></li><li><p>two</p></li></ul><ol><li><p>first</p></li><li><p>second</p></li></ol>",
        );
        assert_eq!(md, "- one\n- two\n\n1. first\n2. second");
    }

    #[test]
    fn test_nested_list() {
        let md = html_to_markdown("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>");
        assert_eq!(md, "- a\n    - b\n- c");
    }

    #[test]
    fn test_blockquote() {
        let md = html_to_markdown("<blockquote><p>quoted</p><p>more</p></blockquote><p>after</p>");
        assert_eq!(md, "> quoted\n>\n> more\n\nafter");
    }

    #[test]
    fn test_code_block_keeps_whitespace() {
        let html = "<pre><code class=\"language-rust\">fn main() {\n    println!(\"hi\");\n}\n</code></pre><p>done</p>";
        let md = html_to_markdown(html);
        assert_eq!(md, "```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\ndone");
    }

    #[test]
    fn test_inline_code_links_and_entities() {
        let md = html_to_markdown(
            "<p>Run <code>cargo</code> see <a href=\"https://docs.rs\">docs</a> &amp; &lt;more&gt;</p>",
        );
        assert_eq!(md, "Run `cargo` see [docs](https://docs.rs) & <more>");
    }

    #[test]
    fn test_line_break_and_rule() {
        let md = html_to_markdown("<p>a<br>b</p><hr><p>c</p>");
        assert_eq!(md, "a\nb\n\n---\n\nc");
    }

    #[test]
    fn test_formatting_whitespace_is_ignored() {
        let md = html_to_markdown("\n  <p>\n   spaced    out\n  </p>\n  <p>next</p>\n");
        assert_eq!(md, "spaced out\n\nnext");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_markup("a &amp; b<br/>"), "a &amp; b");
        assert_eq!(strip_markup("unterminated <p"), "unterminated ");
    }

    #[tokio::test]
    async fn test_rich_copy_writes_html_and_markdown() {
        let clipboard = FakeClipboard::default();
        let outcome = copy_prompt(&clipboard, "<p><strong>Hi</strong></p>").await;
        assert_eq!(outcome, CopyOutcome::Rich);
        assert_eq!(
            clipboard.writes.borrow().as_slice(),
            ["rich:<p><strong>Hi</strong></p>|**Hi**".to_string()]
        );
        assert_eq!(
            outcome.notice(),
            (
                ToastKind::Success,
                "Copied! Formatted for Word/Notes and Markdown for LLMs."
            )
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_stripped_text() {
        let clipboard = FakeClipboard {
            rich_fails: true,
            ..FakeClipboard::default()
        };
        let outcome = copy_prompt(&clipboard, "<p>Hello <b>world</b></p>").await;
        assert_eq!(outcome, CopyOutcome::PlainText);
        assert_eq!(
            clipboard.writes.borrow().as_slice(),
            ["text:Hello world".to_string()]
        );
        assert_eq!(outcome.notice().1, "Copied as plain text");
    }

    #[tokio::test]
    async fn test_both_writes_failing_reports_error_only() {
        let clipboard = FakeClipboard {
            rich_fails: true,
            text_fails: true,
            ..FakeClipboard::default()
        };
        let outcome = copy_prompt(&clipboard, "<p>x</p>").await;
        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(clipboard.writes.borrow().is_empty());
        assert_eq!(
            outcome.notice(),
            (ToastKind::Error, "Failed to copy to clipboard")
        );
    }
}
