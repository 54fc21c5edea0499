//! Bot configuration from TOML (`[bot]` section)

use gemchat_application::BotConfig;
use serde::{Deserialize, Serialize};

/// Raw bot configuration from TOML
///
/// Unset fields fall back to [`BotConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBotConfig {
    pub model: Option<String>,
    pub system_instruction: Option<String>,
    pub fallback_reply: Option<String>,
}

impl FileBotConfig {
    pub fn to_bot_config(&self) -> BotConfig {
        let defaults = BotConfig::default();
        BotConfig {
            model: self.model.clone().unwrap_or(defaults.model),
            system_instruction: self
                .system_instruction
                .clone()
                .unwrap_or(defaults.system_instruction),
            fallback_reply: self
                .fallback_reply
                .clone()
                .unwrap_or(defaults.fallback_reply),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config = FileBotConfig {
            model: Some("gemini-2.5-pro".to_string()),
            ..Default::default()
        };
        let bot = config.to_bot_config();
        assert_eq!(bot.model, "gemini-2.5-pro");
        assert_eq!(bot.fallback_reply, BotConfig::default().fallback_reply);
    }
}
