//! Shared API client and configuration for all views.
//!
//! [`LibraryProvider`] builds one [`api::HttpClient`] from the
//! [`store::LibraryConfig`] and puts both into context, then wraps the app in
//! the session and toast providers.
//!
//! The API root is `base_url` when configured, otherwise the page origin plus
//! `base_path`:
//! - **Web**: `window.location.origin`
//! - **Native**: `http://localhost:8080`, the `dx serve` default

use api::HttpClient;
use dioxus::prelude::*;
use store::config::ApiConfig;
use store::LibraryConfig;

use crate::{AuthProvider, ToastProvider};

/// Origin the application was served from.
pub fn page_origin() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "http://localhost:8080".to_string()
    }
}

/// Create the API client for the configured endpoint.
pub fn make_client(config: &ApiConfig) -> HttpClient {
    let endpoint = config.endpoint(&page_origin());
    tracing::info!("API endpoint: {endpoint}");
    HttpClient::new(endpoint)
}

pub fn use_client() -> HttpClient {
    use_context::<HttpClient>()
}

pub fn use_library_config() -> LibraryConfig {
    use_context::<LibraryConfig>()
}

/// Root provider: configuration, API client, session and toasts.
#[component]
pub fn LibraryProvider(config: LibraryConfig, children: Element) -> Element {
    let ttl_ms = config.toast.ttl_ms;
    let client = use_hook(|| make_client(&config.api));
    use_context_provider(|| client);
    use_context_provider(|| config);

    rsx! {
        AuthProvider {
            ToastProvider { ttl_ms, {children} }
        }
    }
}
