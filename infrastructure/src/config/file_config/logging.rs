//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of bot replies and failures
    pub conversation_log: Option<String>,
    /// Directory for daily diagnostic log files
    pub dir: Option<String>,
    /// `tracing` filter for the log file, e.g. `gemchat=debug`
    pub filter: Option<String>,
}
