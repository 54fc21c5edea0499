//! Conversation entities

use crate::user::entities::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message posted in a channel (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: User,
}

impl Message {
    pub fn new(id: impl Into<String>, content: impl Into<String>, author: User) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp: Utc::now(),
            author,
        }
    }
}

/// Speaker of a turn in the bot's conversational context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Human,
    Assistant,
}

/// One (speaker, text) pair of channel history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ChatTurn {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Human,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// Convert channel messages to turns as seen by `viewer_id`.
///
/// The viewer's own messages are human turns; the bot and every other member
/// speak as the assistant.
pub fn history_for(messages: &[Message], viewer_id: &str) -> Vec<ChatTurn> {
    messages
        .iter()
        .map(|m| {
            if m.author.id == viewer_id {
                ChatTurn::human(m.content.clone())
            } else {
                ChatTurn::assistant(m.content.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_roles_follow_author() {
        let me = User::login("user-1", "Ada");
        let alice = User::new("user-2", "Alice");
        let messages = vec![
            Message::new("msg-0", "Welcome!", User::bot()),
            Message::new("msg-1", "hi", me.clone()),
            Message::new("msg-2", "hey Ada", alice),
        ];

        let turns = history_for(&messages, &me.id);
        assert_eq!(
            turns,
            vec![
                ChatTurn::assistant("Welcome!"),
                ChatTurn::human("hi"),
                ChatTurn::assistant("hey Ada"),
            ]
        );
    }

    #[test]
    fn test_history_of_empty_channel() {
        assert!(history_for(&[], "user-1").is_empty());
    }

    #[test]
    fn test_turn_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatTurn::human("x")).unwrap();
        assert_eq!(json, r#"{"role":"human","text":"x"}"#);
    }
}
