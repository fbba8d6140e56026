//! Client-side state of the prompt library, free of any UI framework.
//!
//! The Dioxus components in `ui` hold these types in signals and forward
//! events to them; everything here can be driven from plain tests against
//! [`api::MemoryApi`].

pub mod clipboard;
pub mod config;
pub mod editor;
pub mod list;
pub mod query;
pub mod seq;
pub mod session;
pub mod toast;

pub use clipboard::{copy_prompt, ClipboardError, ClipboardWriter, CopyOutcome};
pub use config::LibraryConfig;
pub use editor::{DeleteDialog, EditorMode, LoadError, PromptForm, SaveError, TagKey};
pub use list::{ListView, PageInfo, PromptList};
pub use query::ListQuery;
pub use seq::{Sequence, Ticket};
pub use session::Session;
pub use toast::{Flash, FlashSlot, ToastKind};
