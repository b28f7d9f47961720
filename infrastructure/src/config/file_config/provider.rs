//! Gemini provider configuration (`[provider]` section)

use crate::providers::gemini::{DEFAULT_BASE_URL, GeminiConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// ```toml
/// [provider]
/// api_key = "..."              # falls back to $GEMINI_API_KEY
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// request_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            request_timeout_secs: 60,
        }
    }
}

impl FileProviderConfig {
    /// The configured key, else `$GEMINI_API_KEY`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Gateway settings; `None` without an API key
    pub fn to_gemini_config(&self) -> Option<GeminiConfig> {
        let api_key = self.resolve_api_key()?;
        Some(
            GeminiConfig::new(api_key)
                .with_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
                .with_request_timeout(Duration::from_secs(self.request_timeout_secs)),
        )
    }
}
