//! Client configuration.
//!
//! Values are fixed at construction and handed to every operation when its
//! request is built; nothing here is mutated afterwards.

use serde::Deserialize;

/// Per-client settings shared by all operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Scheme and host of the API, e.g. `https://akab-xxxx.luna.akamaiapis.net`.
    pub base_url: String,

    /// Sent as the `PAPI-Use-Prefixes` header. When true the API returns
    /// identifiers with their type prefix (`prp_`, `ctr_`, `grp_`, ...).
    #[serde(default = "default_use_prefixes")]
    pub use_prefixes: bool,
}

fn default_use_prefixes() -> bool {
    true
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            use_prefixes: default_use_prefixes(),
        }
    }

    pub fn with_use_prefixes(mut self, use_prefixes: bool) -> Self {
        self.use_prefixes = use_prefixes;
        self
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://example.luna.akamaiapis.net/");
        assert_eq!(config.base_url, "https://example.luna.akamaiapis.net");
        assert!(config.use_prefixes);
    }

    #[test]
    fn deserializes_with_default_prefixes() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl":"https://example.net/"}"#).unwrap();
        assert!(config.use_prefixes);
        assert_eq!(config.base_url(), "https://example.net");

        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl":"https://example.net","usePrefixes":false}"#)
                .unwrap();
        assert!(!config.use_prefixes);
    }
}
