//! # Client configuration (`library.toml`)
//!
//! The web binary embeds a `library.toml` and parses it at startup. Every field
//! has a default, so a missing section or an empty file is equivalent to the
//! default configuration.
//!
//! ```toml
//! [api]
//! base_path = "/api"                  # appended to the page origin
//! # base_url = "https://host/api"     # overrides origin + base_path
//! login_path = "/auth/google/login"
//!
//! [list]
//! page_size = 20
//! debounce_ms = 300
//!
//! [toast]
//! ttl_ms = 4000
//! ```

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `library.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub toast: ToastConfig,
}

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Absolute API root. When unset the page origin plus `base_path` is used.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Server path that starts the external sign-in.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Quiet period before typed search text is committed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_login_path() -> String {
    "/auth/google/login".to_string()
}

fn default_page_size() -> u64 {
    20
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_ttl_ms() -> u64 {
    4000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            base_url: None,
            login_path: default_login_path(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

impl ApiConfig {
    /// API root for a page served from `origin` (e.g. `https://host`).
    pub fn endpoint(&self, origin: &str) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "{}{}",
                origin.trim_end_matches('/'),
                self.base_path.trim_end_matches('/')
            ),
        }
    }
}

impl LibraryConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "library.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse, falling back to the defaults (and logging why) on a bad file.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {e}", Self::filename());
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = LibraryConfig::from_toml("").unwrap();
        assert_eq!(config, LibraryConfig::default());
        assert_eq!(config.list.page_size, 20);
        assert_eq!(config.list.debounce_ms, 300);
        assert_eq!(config.toast.ttl_ms, 4000);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = LibraryConfig::from_toml("[list]\npage_size = 50\n").unwrap();
        assert_eq!(config.list.page_size, 50);
        assert_eq!(config.list.debounce_ms, 300);
        assert_eq!(config.api.base_path, "/api");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let config = LibraryConfig::from_toml_or_default("[list]\npage_size = \"many\"");
        assert_eq!(config, LibraryConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = LibraryConfig::default();
        config.api.base_url = Some("https://prompts.example.com/api".to_string());
        let text = config.to_toml().unwrap();
        assert_eq!(LibraryConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_endpoint() {
        let api = ApiConfig::default();
        assert_eq!(api.endpoint("https://host/"), "https://host/api");

        let pinned = ApiConfig {
            base_url: Some("http://localhost:8000/api/".to_string()),
            ..ApiConfig::default()
        };
        assert_eq!(pinned.endpoint("https://host"), "http://localhost:8000/api");
    }
}
