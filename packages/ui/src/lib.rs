//! Shared UI for the prompt library: providers, widgets and page views.
//!
//! Pages take navigation callbacks instead of a router type so the platform
//! crate decides how URLs map onto them.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const LIBRARY_CSS: Asset = asset!("/assets/library.css");

mod timer;

mod client;
pub use client::{make_client, page_origin, use_client, use_library_config, LibraryProvider};

mod auth;
pub use auth::{
    observe_api_error, refetch_session, use_auth, AuthProvider, LoginButton, LogoutButton,
};

mod toast;
pub use toast::{use_flash, use_toasts, ToastProvider, Toasts};

mod clipboard;
pub use clipboard::{BrowserClipboard, CopyButton};

mod navbar;
pub use navbar::Navbar;

mod rich_text_editor;
pub use rich_text_editor::RichTextEditor;

mod tag_input;
pub use tag_input::TagInput;
