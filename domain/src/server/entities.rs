//! Server entities

use super::value_objects::{ServerCategory, ServerRole};
use crate::channel::entities::ChannelDraft;
use crate::core::error::DomainError;
use crate::core::string::dicebear_url;
use crate::user::entities::User;
use serde::{Deserialize, Serialize};

/// A user's membership in a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user: User,
    pub role: ServerRole,
}

impl Member {
    pub fn new(user: User, role: ServerRole) -> Self {
        Self { user, role }
    }
}

/// A named grouping of channels and members (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    pub name: String,
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ServerCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    pub members: Vec<Member>,
}

impl Server {
    pub fn member(&self, user_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.user.id == user_id)
    }

    pub fn role_of(&self, user_id: &str) -> Option<ServerRole> {
        self.member(user_id).map(|m| m.role)
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.member(user_id).is_some()
    }

    /// Add a member; fails if the user already belongs to the server.
    pub fn add_member(&mut self, user: User, role: ServerRole) -> Result<(), DomainError> {
        if self.has_member(&user.id) {
            return Err(DomainError::AlreadyMember(user.name));
        }
        self.members.push(Member::new(user, role));
        Ok(())
    }

    /// Remove a member, returning the removed membership.
    pub fn remove_member(&mut self, user_id: &str) -> Result<Member, DomainError> {
        let index = self
            .members
            .iter()
            .position(|m| m.user.id == user_id)
            .ok_or_else(|| DomainError::NotAMember(user_id.to_string()))?;
        Ok(self.members.remove(index))
    }

    pub fn set_role(&mut self, user_id: &str, role: ServerRole) -> Result<(), DomainError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user.id == user_id)
            .ok_or_else(|| DomainError::NotAMember(user_id.to_string()))?;
        member.role = role;
        Ok(())
    }

    /// Apply a settings edit. A blank name is rejected.
    pub fn apply(&mut self, update: UpdateServerData) -> Result<(), DomainError> {
        if let Some(name) = &update.name
            && name.trim().is_empty()
        {
            return Err(DomainError::InvalidName(
                "server name cannot be empty".to_string(),
            ));
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(icon_url) = update.icon_url {
            self.icon_url = icon_url;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        Ok(())
    }
}

/// Input of the "create server" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateServerData {
    pub name: String,
    pub category: Option<ServerCategory>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub channels: Vec<ChannelDraft>,
}

impl CreateServerData {
    /// A server with a single `general` channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Some(ServerCategory::General),
            description: None,
            icon_url: None,
            channels: vec![ChannelDraft::new("general")],
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidName(
                "server name cannot be empty".to_string(),
            ));
        }
        if self.channels.is_empty() {
            return Err(DomainError::NoChannels);
        }
        if self.channels.iter().any(|c| c.name.trim().is_empty()) {
            return Err(DomainError::InvalidName(
                "channel name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the server owned by `owner`, who becomes its only admin.
    pub fn into_server(self, id: String, owner: User) -> Server {
        let name = self.name.trim().to_string();
        let icon_url = self
            .icon_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| dicebear_url("shapes", &name));
        Server {
            id,
            icon_url,
            category: self.category,
            description: self.description.filter(|d| !d.trim().is_empty()),
            owner_id: owner.id.clone(),
            members: vec![Member::new(owner, ServerRole::Admin)],
            name,
        }
    }
}

/// Partial edit from the server settings overview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateServerData {
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<ServerCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> User {
        User::login("user-1", "Ada")
    }

    fn server() -> Server {
        CreateServerData::new("Book Club").into_server("server-9".to_string(), owner())
    }

    #[test]
    fn test_creator_is_owner_and_admin() {
        let s = server();
        assert!(s.is_owner("user-1"));
        assert_eq!(s.role_of("user-1"), Some(ServerRole::Admin));
        assert_eq!(s.members.len(), 1);
        assert!(s.icon_url.contains("shapes/svg?seed=Book%20Club"));
    }

    #[test]
    fn test_validate_rejects_blank_name_and_channels() {
        let mut data = CreateServerData::new("  ");
        assert!(matches!(data.validate(), Err(DomainError::InvalidName(_))));

        data.name = "Ok".to_string();
        data.channels.clear();
        assert_eq!(data.validate(), Err(DomainError::NoChannels));

        data.channels.push(ChannelDraft::new("   "));
        assert!(matches!(data.validate(), Err(DomainError::InvalidName(_))));
    }

    #[test]
    fn test_add_member_twice_fails() {
        let mut s = server();
        let bob = User::new("user-3", "Bob");
        s.add_member(bob.clone(), ServerRole::User).unwrap();
        assert_eq!(
            s.add_member(bob, ServerRole::Admin),
            Err(DomainError::AlreadyMember("Bob".to_string()))
        );
    }

    #[test]
    fn test_set_role_and_remove() {
        let mut s = server();
        s.add_member(User::new("user-3", "Bob"), ServerRole::User)
            .unwrap();
        s.set_role("user-3", ServerRole::Admin).unwrap();
        assert_eq!(s.role_of("user-3"), Some(ServerRole::Admin));

        let removed = s.remove_member("user-3").unwrap();
        assert_eq!(removed.user.name, "Bob");
        assert!(s.remove_member("user-3").is_err());
    }

    #[test]
    fn test_apply_update() {
        let mut s = server();
        s.apply(UpdateServerData {
            name: Some("Readers".to_string()),
            category: Some(ServerCategory::Hobby),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(s.name, "Readers");
        assert_eq!(s.category, Some(ServerCategory::Hobby));

        assert!(
            s.apply(UpdateServerData {
                name: Some("".to_string()),
                ..Default::default()
            })
            .is_err()
        );
        assert_eq!(s.name, "Readers");
    }
}
