//! Toasts and the one-shot toast carried across navigation.
//!
//! Rendering, ids, expiry and the close button come from the
//! `dioxus-primitives` toast provider; [`Toasts`] adds the configured lifetime
//! and maps [`ToastKind`] onto it.

use std::time::Duration;

use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use store::{Flash, FlashSlot, ToastKind};

/// Handle for showing toasts. Obtain with [`use_toasts`].
#[derive(Clone)]
pub struct Toasts {
    inner: dioxus_primitives::toast::Toasts,
    ttl_ms: u64,
}

impl Toasts {
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let options = ToastOptions::new().duration(Duration::from_millis(self.ttl_ms));
        match kind {
            ToastKind::Success => self.inner.success(message.into(), options),
            ToastKind::Error => self.inner.error(message.into(), options),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message)
    }

    pub fn flash(&self, flash: Flash) {
        self.show(flash.kind, flash.message)
    }
}

pub fn use_toasts() -> Toasts {
    let inner = use_toast();
    let ttl_ms = use_context::<ToastTtl>().0;
    Toasts { inner, ttl_ms }
}

/// Pending toast for the next page, e.g. "Prompt deleted successfully" shown
/// by the list after leaving the editor.
pub fn use_flash() -> Signal<FlashSlot> {
    use_context::<Signal<FlashSlot>>()
}

#[derive(Clone, Copy)]
struct ToastTtl(u64);

/// Toast stack plus the flash slot. Toasts expire after `ttl_ms`.
#[component]
pub fn ToastProvider(ttl_ms: u64, children: Element) -> Element {
    use_context_provider(|| ToastTtl(ttl_ms));
    use_context_provider(|| Signal::new(FlashSlot::default()));

    rsx! {
        dioxus_primitives::toast::ToastProvider {
            {children}
        }
    }
}
