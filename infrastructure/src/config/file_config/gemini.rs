//! Gemini API configuration from TOML (`[gemini]` section)

use crate::gemini::settings::DEFAULT_TIMEOUT_SECONDS;
use serde::{Deserialize, Serialize};

/// Environment variable checked when `api_key_env` is not configured.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Last-resort environment variable for the API key.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// API key; prefer the environment over committing this
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API host override (proxies, tests)
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            base_url: None,
            temperature: None,
            max_output_tokens: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl FileGeminiConfig {
    /// Find the API key: `api_key`, then `$api_key_env`, then `$GEMINI_API_KEY`.
    ///
    /// `lookup` reads an environment variable; blank values count as unset.
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        non_blank(self.api_key.clone())
            .or_else(|| non_blank(lookup(&self.api_key_env)))
            .or_else(|| non_blank(lookup(FALLBACK_API_KEY_ENV)))
    }
}
