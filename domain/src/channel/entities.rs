//! Channel entities

use crate::core::string::slugify_channel_name;
use crate::server::value_objects::ServerRole;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Who may post in a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelPermissions {
    #[default]
    ReadWrite,
    ReadOnly,
}

impl ChannelPermissions {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelPermissions::ReadWrite => "read-write",
            ChannelPermissions::ReadOnly => "read-only",
        }
    }
}

impl fmt::Display for ChannelPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel icon. The four built-ins have glyphs; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChannelIcon {
    #[default]
    Chat,
    Code,
    Gaming,
    Book,
    Custom(String),
}

impl ChannelIcon {
    pub const BUILTIN: [ChannelIcon; 4] = [
        ChannelIcon::Chat,
        ChannelIcon::Code,
        ChannelIcon::Gaming,
        ChannelIcon::Book,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ChannelIcon::Chat => "chat",
            ChannelIcon::Code => "code",
            ChannelIcon::Gaming => "gaming",
            ChannelIcon::Book => "book",
            ChannelIcon::Custom(s) => s,
        }
    }
}

impl fmt::Display for ChannelIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChannelIcon {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "chat" => ChannelIcon::Chat,
            "code" => ChannelIcon::Code,
            "gaming" => ChannelIcon::Gaming,
            "book" => ChannelIcon::Book,
            _ => ChannelIcon::Custom(s.trim().to_string()),
        })
    }
}

impl Serialize for ChannelIcon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChannelIcon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // FromStr for ChannelIcon is infallible
        Ok(s.parse().unwrap_or_default())
    }
}

/// A named conversation thread within a server (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub server_id: String,
    #[serde(default)]
    pub icon: ChannelIcon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub permissions: ChannelPermissions,
}

impl Channel {
    pub fn is_read_only(&self) -> bool {
        self.permissions == ChannelPermissions::ReadOnly
    }

    /// Read-only channels only accept posts from admins.
    pub fn is_read_only_for(&self, role: Option<ServerRole>) -> bool {
        self.is_read_only() && role != Some(ServerRole::Admin)
    }
}

/// Input for a new channel, before it has an id or a server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelDraft {
    pub name: String,
    pub topic: Option<String>,
    pub icon: ChannelIcon,
    pub permissions: ChannelPermissions,
}

impl ChannelDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: slugify_channel_name(name),
            ..Default::default()
        }
    }

    pub fn read_only(mut self) -> Self {
        self.permissions = ChannelPermissions::ReadOnly;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.topic = (!topic.trim().is_empty()).then_some(topic);
        self
    }

    pub fn with_icon(mut self, icon: ChannelIcon) -> Self {
        self.icon = icon;
        self
    }

    pub fn into_channel(self, id: String, server_id: String) -> Channel {
        Channel {
            id,
            name: slugify_channel_name(&self.name),
            server_id,
            icon: self.icon,
            topic: self.topic,
            permissions: self.permissions,
        }
    }
}
