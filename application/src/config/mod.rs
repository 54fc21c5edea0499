//! Application-level configuration.
//!
//! - [`BotConfig`]: which model answers, how it is instructed, and what the
//!   channel shows when it cannot answer

pub mod bot_config;

pub use bot_config::BotConfig;
