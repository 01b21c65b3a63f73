use serde::{Deserialize, Serialize};

use crate::models::SyncRange;

/// Client-side settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix for every backend path
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Local-storage key holding the JSON-encoded token
    #[serde(default = "default_token_key")]
    pub token_storage_key: String,

    /// Delay before a typed class search is sent (milliseconds)
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u32,

    /// Page size for paginated lists
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub default_sync_range: SyncRange,
}

fn default_api_base() -> String {
    "/api".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_search_debounce() -> u32 {
    350
}

fn default_page_size() -> u32 {
    20
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_storage_key: default_token_key(),
            search_debounce_ms: default_search_debounce(),
            page_size: default_page_size(),
            default_sync_range: SyncRange::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the API base overridable at compile time through
    /// `CLASSDESK_API_BASE`.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = option_env!("CLASSDESK_API_BASE").filter(|b| !b.trim().is_empty()) {
            config.api_base = base.to_string();
        }
        config
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Join the base and a path (`path` starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.token_storage_key, "token");
        assert_eq!(config.search_debounce_ms, 350);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.default_sync_range, SyncRange::Month);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ClientConfig::default().with_api_base("https://tasks.example.edu/api/");
        assert_eq!(config.url("/classes/my"), "https://tasks.example.edu/api/classes/my");
        assert_eq!(ClientConfig::default().url("/users/me"), "/api/users/me");
    }

    #[test]
    fn test_partial_override() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"page_size": 50, "default_sync_range": "week"}"#).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.default_sync_range, SyncRange::Week);
        assert_eq!(config.api_base, "/api");
    }
}
