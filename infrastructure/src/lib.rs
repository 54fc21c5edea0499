//! Infrastructure layer for gemchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileBotConfig, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, Severity,
};
pub use gemini::{
    error::{GeminiError, Result},
    gateway::GeminiGateway,
    session::GeminiSession,
    settings::GeminiSettings,
};
pub use logging::JsonlConversationLogger;
