//! User entities

use crate::core::error::DomainError;
use crate::core::string::dicebear_url;
use serde::{Deserialize, Serialize};

/// Id of the bot participant.
pub const BOT_USER_ID: &str = "gemini-bot";

/// A chat participant (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            avatar_url: dicebear_url("bottts", &name),
            name,
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// The user created by logging in with `name`.
    pub fn login(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name).with_role("Team Member")
    }

    /// The AI participant whose replies come from the model.
    pub fn bot() -> Self {
        Self {
            id: BOT_USER_ID.to_string(),
            name: "Gemini".to_string(),
            avatar_url: String::new(),
            role: Some("AI Assistant".to_string()),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.id == BOT_USER_ID
    }

    /// Apply a profile edit.
    ///
    /// A blank name is rejected; a blank role clears the role.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), DomainError> {
        if let Some(name) = &update.name
            && name.trim().is_empty()
        {
            return Err(DomainError::InvalidName("name cannot be empty".to_string()));
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(role) = update.role {
            let role = role.trim();
            self.role = (!role.is_empty()).then(|| role.to_string());
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = avatar_url;
        }
        Ok(())
    }
}

/// Fields of the profile dialog; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.avatar_url.is_none()
    }
}
