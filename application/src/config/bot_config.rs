//! Bot participant configuration.

use serde::{Deserialize, Serialize};

/// Model used when nothing is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// System instruction given to every new channel session.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful and friendly chatbot in a chat application. \
Your responses should be concise and conversational, suitable for a chat environment. \
Format your responses using markdown where appropriate (e.g., code blocks, lists, bold text).";

/// Bot message posted when the AI call fails.
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I couldn't process that. Please check your API key and try again.";

/// How the bot answers in channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Model identifier sent to the provider
    pub model: String,
    /// Instruction seeded into every channel session
    pub system_instruction: String,
    /// Message shown in the channel when the AI call fails
    pub fallback_reply: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        assert_eq!(BotConfig::default().model, "gemini-2.5-flash");
    }
}
