//! Configuration file loading for gemchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GEMCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./gemchat.toml` or `./.gemchat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/gemchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_API_KEY_ENV, FALLBACK_API_KEY_ENV, FileBotConfig, FileConfig,
    FileGeminiConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
