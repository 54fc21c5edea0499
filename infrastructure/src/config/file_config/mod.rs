//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into runtime settings happens
//! here too.

mod bot;
mod gemini;
mod logging;
mod output;
mod repl;

pub use bot::FileBotConfig;
pub use gemini::{DEFAULT_API_KEY_ENV, FALLBACK_API_KEY_ENV, FileGeminiConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use crate::gemini::error::GeminiError;
use crate::gemini::settings::{DEFAULT_BASE_URL, GeminiSettings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini API access
    pub gemini: FileGeminiConfig,
    /// Bot model and wording
    pub bot: FileBotConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log files
    pub logging: FileLoggingConfig,
}

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work at all.
    Error,
    /// Works, but probably not as intended.
    Warning,
}

/// A detected problem in the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key, e.g. `gemini.temperature`
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Replace `bot.model` with a command-line value, if one was given.
    ///
    /// Call before [`FileConfig::validate`] so the override is checked too.
    pub fn override_model(&mut self, model: Option<String>) {
        if let Some(model) = model {
            self.bot.model = Some(model);
        }
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(model) = &self.bot.model
            && model.trim().is_empty()
        {
            issues.push(ConfigIssue::error("bot.model", "model name cannot be empty"));
        }

        if let Some(t) = self.gemini.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::error(
                "gemini.temperature",
                format!("{} is outside 0.0..=2.0", t),
            ));
        }

        if self.gemini.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                "gemini.timeout_seconds",
                "timeout_seconds cannot be 0",
            ));
        }

        if self.gemini.max_output_tokens == Some(0) {
            issues.push(ConfigIssue::warning(
                "gemini.max_output_tokens",
                "0 leaves no room for a reply",
            ));
        }

        if self.gemini.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                "gemini.api_key",
                format!(
                    "API key stored in a config file; consider ${} instead",
                    self.gemini.api_key_env
                ),
            ));
        }

        if let Some(reply) = &self.bot.fallback_reply
            && reply.trim().is_empty()
        {
            issues.push(ConfigIssue::warning(
                "bot.fallback_reply",
                "failed replies will post an empty message",
            ));
        }

        issues
    }

    /// Runtime settings for the Gemini gateway.
    ///
    /// `lookup` reads environment variables for the API key.
    pub fn gemini_settings(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<GeminiSettings, GeminiError> {
        let api_key = self
            .gemini
            .resolve_api_key(lookup)
            .ok_or_else(|| GeminiError::MissingApiKey(self.gemini.api_key_env.clone()))?;
        let bot = self.bot.to_bot_config();

        Ok(GeminiSettings {
            api_key,
            base_url: self
                .gemini
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: bot.model,
            system_instruction: None,
            temperature: self.gemini.temperature,
            max_output_tokens: self.gemini.max_output_tokens,
            timeout: Duration::from_secs(self.gemini.timeout_seconds),
        }
        .with_system_instruction(bot.system_instruction))
    }
}
