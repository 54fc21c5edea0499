//! The in-memory workspace seen by one logged-in user.

use super::seed;
use crate::channel::entities::{Channel, ChannelDraft};
use crate::conversation::entities::Message;
use crate::core::error::DomainError;
use crate::core::id::IdGenerator;
use crate::server::entities::{CreateServerData, Member, Server, UpdateServerData};
use crate::server::value_objects::ServerRole;
use crate::user::entities::{ProfileUpdate, User};
use std::collections::HashMap;

/// Servers, channels and messages of the current login (Aggregate Root)
///
/// Everything lives in memory. `login` seeds the mock data and `logout`
/// drops all of it.
#[derive(Debug, Default)]
pub struct Workspace {
    ids: IdGenerator,
    current_user: Option<User>,
    directory: Vec<User>,
    servers: Vec<Server>,
    channels: Vec<Channel>,
    active_server_id: Option<String>,
    active_channel_id: Option<String>,
    messages: HashMap<String, Vec<Message>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Session ====================

    /// Log in as `username`, seeding the mock servers and channels.
    pub fn login(&mut self, username: &str) -> Result<&User, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::InvalidName(
                "username cannot be empty".to_string(),
            ));
        }

        self.logout();

        let user = User::login(self.ids.next("user"), username);
        self.directory = seed::directory();
        self.servers = seed::servers(&user, &self.directory);
        self.channels = seed::channels();
        self.active_server_id = self.servers.first().map(|s| s.id.clone());
        self.active_channel_id = self.channels.first().map(|c| c.id.clone());

        if let Some(channel_id) = self.active_channel_id.clone() {
            self.messages.insert(
                channel_id,
                vec![Message::new("msg-0", seed::WELCOME_MESSAGE, User::bot())],
            );
        }

        let user: &User = self.current_user.insert(user);
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.current_user = None;
        self.directory.clear();
        self.servers.clear();
        self.channels.clear();
        self.active_server_id = None;
        self.active_channel_id = None;
        self.messages.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    fn require_user(&self) -> Result<&User, DomainError> {
        self.current_user.as_ref().ok_or(DomainError::NotLoggedIn)
    }

    /// Edit the current user's profile.
    ///
    /// Membership entries carry a copy of the user, so they are refreshed too.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User, DomainError> {
        let user = self.current_user.as_mut().ok_or(DomainError::NotLoggedIn)?;
        user.apply(update)?;
        let updated = user.clone();

        for member in self
            .servers
            .iter_mut()
            .flat_map(|s| s.members.iter_mut())
            .filter(|m| m.user.id == updated.id)
        {
            member.user = updated.clone();
        }

        self.require_user()
    }

    /// Users that can be invited.
    pub fn directory(&self) -> &[User] {
        &self.directory
    }

    // ==================== Navigation ====================

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn server(&self, server_id: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == server_id)
    }

    fn server_mut(&mut self, server_id: &str) -> Result<&mut Server, DomainError> {
        self.servers
            .iter_mut()
            .find(|s| s.id == server_id)
            .ok_or_else(|| DomainError::ServerNotFound(server_id.to_string()))
    }

    pub fn active_server(&self) -> Option<&Server> {
        self.active_server_id
            .as_deref()
            .and_then(|id| self.server(id))
    }

    pub fn channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == channel_id)
    }

    /// Channels of one server, in creation order.
    pub fn channels_of(&self, server_id: &str) -> Vec<&Channel> {
        self.channels
            .iter()
            .filter(|c| c.server_id == server_id)
            .collect()
    }

    /// Channels of the active server.
    pub fn server_channels(&self) -> Vec<&Channel> {
        match self.active_server_id.as_deref() {
            Some(id) => self.channels_of(id),
            None => Vec::new(),
        }
    }

    pub fn active_channel(&self) -> Option<&Channel> {
        self.active_channel_id
            .as_deref()
            .and_then(|id| self.channel(id))
    }

    pub fn active_channel_id(&self) -> Option<&str> {
        self.active_channel_id.as_deref()
    }

    /// Switch server. Keeps the active channel if it belongs to the new
    /// server, otherwise falls back to the server's first channel (or none).
    pub fn select_server(&mut self, server_id: &str) -> Result<(), DomainError> {
        self.require_user()?;
        if self.server(server_id).is_none() {
            return Err(DomainError::ServerNotFound(server_id.to_string()));
        }
        self.active_server_id = Some(server_id.to_string());

        let (keep, first) = {
            let channels = self.channels_of(server_id);
            let keep = self
                .active_channel_id
                .as_deref()
                .is_some_and(|active| channels.iter().any(|c| c.id == active));
            (keep, channels.first().map(|c| c.id.clone()))
        };
        if !keep {
            self.active_channel_id = first;
        }
        Ok(())
    }

    /// Switch channel within the active server.
    pub fn select_channel(&mut self, channel_id: &str) -> Result<(), DomainError> {
        self.require_user()?;
        let in_active = self
            .channel(channel_id)
            .is_some_and(|c| Some(c.server_id.as_str()) == self.active_server_id.as_deref());
        if !in_active {
            return Err(DomainError::ChannelNotFound(channel_id.to_string()));
        }
        self.active_channel_id = Some(channel_id.to_string());
        Ok(())
    }

    /// Find a server by id, 1-based position, or case-insensitive name.
    pub fn resolve_server(&self, query: &str) -> Option<&Server> {
        let query = query.trim();
        self.server(query)
            .or_else(|| {
                query
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.servers.get(i))
            })
            .or_else(|| {
                self.servers
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(query))
            })
    }

    /// Find a channel of the active server by id, 1-based position, or name
    /// (a leading `#` is ignored).
    pub fn resolve_channel(&self, query: &str) -> Option<&Channel> {
        let query = query.trim().trim_start_matches('#');
        let channels = self.server_channels();
        channels
            .iter()
            .find(|c| c.id == query)
            .or_else(|| {
                query
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| channels.get(i))
            })
            .or_else(|| channels.iter().find(|c| c.name.eq_ignore_ascii_case(query)))
            .copied()
    }

    // ==================== Servers ====================

    /// Create a server owned by the current user and switch to it.
    pub fn create_server(&mut self, data: CreateServerData) -> Result<&Server, DomainError> {
        data.validate()?;
        let owner = self.require_user()?.clone();

        let server_id = self.ids.next("server");
        let drafts = data.channels.clone();
        let server = data.into_server(server_id.clone(), owner);

        let mut first_channel = None;
        for draft in drafts {
            let channel = draft.into_channel(self.ids.next("channel"), server_id.clone());
            first_channel.get_or_insert_with(|| channel.id.clone());
            self.channels.push(channel);
        }

        self.servers.push(server);
        self.active_server_id = Some(server_id.clone());
        self.active_channel_id = first_channel;

        self.server(&server_id)
            .ok_or(DomainError::ServerNotFound(server_id))
    }

    pub fn update_server(
        &mut self,
        server_id: &str,
        update: UpdateServerData,
    ) -> Result<&Server, DomainError> {
        self.require_user()?;
        self.server_mut(server_id)?.apply(update)?;
        self.server(server_id)
            .ok_or_else(|| DomainError::ServerNotFound(server_id.to_string()))
    }

    /// Add a channel to the active server and switch to it.
    pub fn create_channel(&mut self, draft: ChannelDraft) -> Result<&Channel, DomainError> {
        self.require_user()?;
        if draft.name.trim().is_empty() {
            return Err(DomainError::InvalidName(
                "channel name cannot be empty".to_string(),
            ));
        }
        let server_id = self
            .active_server_id
            .clone()
            .ok_or(DomainError::NoActiveServer)?;

        let channel = draft.into_channel(self.ids.next("channel"), server_id);
        let channel_id = channel.id.clone();
        self.channels.push(channel);
        self.active_channel_id = Some(channel_id.clone());

        self.channel(&channel_id)
            .ok_or(DomainError::ChannelNotFound(channel_id))
    }

    // ==================== Members ====================

    /// Invite a directory user by name (case-insensitive).
    pub fn invite_member(
        &mut self,
        server_id: &str,
        username: &str,
        role: ServerRole,
    ) -> Result<User, DomainError> {
        self.require_user()?;
        let username = username.trim();
        let user = self
            .directory
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(username))
            .cloned()
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        self.server_mut(server_id)?.add_member(user.clone(), role)?;
        Ok(user)
    }

    /// Remove a member. Only the owner may do this, and not to themself.
    pub fn remove_member(&mut self, server_id: &str, user_id: &str) -> Result<Member, DomainError> {
        self.check_owner_action(server_id, user_id)?;
        self.server_mut(server_id)?.remove_member(user_id)
    }

    /// Change a member's role. Only the owner may do this, and not to themself.
    pub fn change_member_role(
        &mut self,
        server_id: &str,
        user_id: &str,
        role: ServerRole,
    ) -> Result<(), DomainError> {
        self.check_owner_action(server_id, user_id)?;
        self.server_mut(server_id)?.set_role(user_id, role)
    }

    /// Whether the current user may remove or re-role `target_id` in `server_id`.
    pub fn check_owner_action(&self, server_id: &str, target_id: &str) -> Result<(), DomainError> {
        let actor = self.require_user()?;
        let server = self
            .server(server_id)
            .ok_or_else(|| DomainError::ServerNotFound(server_id.to_string()))?;

        if !server.is_owner(&actor.id) {
            return Err(DomainError::PermissionDenied(format!(
                "only the owner of {} can manage members",
                server.name
            )));
        }
        if actor.id == target_id {
            return Err(DomainError::PermissionDenied(
                "the owner cannot change their own membership".to_string(),
            ));
        }
        Ok(())
    }

    /// The current user's role in the active server.
    pub fn current_role(&self) -> Option<ServerRole> {
        let user = self.current_user.as_ref()?;
        self.active_server()?.role_of(&user.id)
    }

    /// Whether the current user may post in `channel_id`.
    pub fn can_post(&self, channel_id: &str) -> bool {
        let (Some(user), Some(channel)) = (self.current_user.as_ref(), self.channel(channel_id))
        else {
            return false;
        };
        let role = self
            .server(&channel.server_id)
            .and_then(|s| s.role_of(&user.id));
        !channel.is_read_only_for(role)
    }

    // ==================== Messages ====================

    pub fn messages(&self, channel_id: &str) -> &[Message] {
        self.messages
            .get(channel_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append a message to a channel, returning it.
    pub fn push_message(
        &mut self,
        channel_id: &str,
        content: impl Into<String>,
        author: User,
    ) -> Result<&Message, DomainError> {
        if self.channel(channel_id).is_none() {
            return Err(DomainError::ChannelNotFound(channel_id.to_string()));
        }
        let message = Message::new(self.ids.next("msg"), content, author);
        let list = self.messages.entry(channel_id.to_string()).or_default();
        list.push(message);
        list.last()
            .ok_or_else(|| DomainError::ChannelNotFound(channel_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::value_objects::ServerCategory;

    fn logged_in() -> Workspace {
        let mut ws = Workspace::new();
        ws.login("Ada").unwrap();
        ws
    }

    fn me(ws: &Workspace) -> String {
        ws.current_user().unwrap().id.clone()
    }

    #[test]
    fn test_login_seeds_workspace() {
        let ws = logged_in();
        assert_eq!(ws.servers().len(), 3);
        assert_eq!(ws.active_server().unwrap().id, "server-1");
        assert_eq!(ws.active_channel().unwrap().name, "welcome");

        let welcome = ws.messages("channel-1");
        assert_eq!(welcome.len(), 1);
        assert!(welcome[0].author.is_bot());
        assert_eq!(welcome[0].content, seed::WELCOME_MESSAGE);
    }

    #[test]
    fn test_login_rejects_blank_name() {
        let mut ws = Workspace::new();
        assert!(matches!(ws.login("   "), Err(DomainError::InvalidName(_))));
        assert!(!ws.is_logged_in());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut ws = logged_in();
        ws.logout();
        assert!(!ws.is_logged_in());
        assert!(ws.servers().is_empty());
        assert!(ws.active_channel().is_none());
        assert!(ws.messages("channel-1").is_empty());
    }

    #[test]
    fn test_operations_require_login() {
        let mut ws = Workspace::new();
        assert_eq!(ws.select_server("server-1"), Err(DomainError::NotLoggedIn));
        assert!(matches!(
            ws.create_server(CreateServerData::new("x")),
            Err(DomainError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_select_server_picks_first_channel() {
        let mut ws = logged_in();
        ws.select_server("server-2").unwrap();
        assert_eq!(ws.active_channel_id(), Some("channel-3"));

        ws.select_channel("channel-4").unwrap();
        ws.select_server("server-2").unwrap();
        assert_eq!(ws.active_channel_id(), Some("channel-4"));
    }

    #[test]
    fn test_select_channel_outside_active_server_fails() {
        let mut ws = logged_in();
        assert_eq!(
            ws.select_channel("channel-3"),
            Err(DomainError::ChannelNotFound("channel-3".to_string()))
        );
    }

    #[test]
    fn test_resolve_by_index_and_name() {
        let ws = logged_in();
        assert_eq!(ws.resolve_server("2").unwrap().id, "server-2");
        assert_eq!(ws.resolve_server("random chats").unwrap().id, "server-3");
        assert_eq!(ws.resolve_channel("#general-chat").unwrap().id, "channel-2");
        assert_eq!(ws.resolve_channel("3").unwrap().id, "channel-6");
        assert!(ws.resolve_channel("memes").is_none());
        assert!(ws.resolve_server("0").is_none());
    }

    #[test]
    fn test_create_server_switches_to_it() {
        let mut ws = logged_in();
        let mut data = CreateServerData::new("Book Club");
        data.category = Some(ServerCategory::Hobby);
        data.channels.push(ChannelDraft::new("Reading List").read_only());

        let server_id = ws.create_server(data).unwrap().id.clone();
        assert_eq!(ws.active_server().unwrap().id, server_id);

        let channels = ws.server_channels();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "general");
        assert_eq!(channels[1].name, "reading-list");
        assert_eq!(ws.active_channel_id(), Some(channels[0].id.as_str()));
        assert_ne!(channels[0].id, channels[1].id);
    }

    #[test]
    fn test_create_channel_in_active_server() {
        let mut ws = logged_in();
        ws.select_server("server-3").unwrap();
        let id = ws
            .create_channel(ChannelDraft::new("Weekend Plans").with_topic("Plans"))
            .unwrap()
            .id
            .clone();
        let channel = ws.active_channel().unwrap();
        assert_eq!(channel.id, id);
        assert_eq!(channel.server_id, "server-3");
        assert_eq!(channel.name, "weekend-plans");
    }

    #[test]
    fn test_invite_member() {
        let mut ws = logged_in();
        let user = ws
            .invite_member("server-3", "  alice ", ServerRole::User)
            .unwrap();
        assert_eq!(user.name, "Alice");
        assert!(ws.server("server-3").unwrap().has_member(&user.id));

        assert_eq!(
            ws.invite_member("server-3", "Alice", ServerRole::Admin),
            Err(DomainError::AlreadyMember("Alice".to_string()))
        );
        assert_eq!(
            ws.invite_member("server-3", "Mallory", ServerRole::User),
            Err(DomainError::UserNotFound("Mallory".to_string()))
        );
    }

    #[test]
    fn test_owner_manages_members() {
        let mut ws = logged_in();
        ws.change_member_role("server-1", "user-2", ServerRole::Admin)
            .unwrap();
        assert_eq!(
            ws.server("server-1").unwrap().role_of("user-2"),
            Some(ServerRole::Admin)
        );

        let removed = ws.remove_member("server-1", "user-3").unwrap();
        assert_eq!(removed.user.name, "Bob");
        assert!(!ws.server("server-1").unwrap().has_member("user-3"));
    }

    #[test]
    fn test_non_owner_cannot_manage_members() {
        let mut ws = logged_in();
        let err = ws.remove_member("server-2", "user-5").unwrap_err();
        assert!(err.is_permission_denied());
        assert!(ws.server("server-2").unwrap().has_member("user-5"));
    }

    #[test]
    fn test_current_role_follows_active_server() {
        let mut ws = Workspace::new();
        assert_eq!(ws.current_role(), None);

        ws.login("Ada").unwrap();
        assert_eq!(ws.current_role(), Some(ServerRole::Admin));

        // Charlie owns Project Discussions, but the viewer is still an admin there
        ws.select_server("server-2").unwrap();
        assert!(!ws.active_server().unwrap().is_owner(&me(&ws)));
        assert_eq!(ws.current_role(), Some(ServerRole::Admin));

        ws.logout();
        assert_eq!(ws.current_role(), None);
    }

    #[test]
    fn test_owner_cannot_target_self() {
        let mut ws = logged_in();
        let my_id = me(&ws);
        let err = ws
            .change_member_role("server-1", &my_id, ServerRole::User)
            .unwrap_err();
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_can_post_respects_read_only() {
        let mut ws = logged_in();
        assert!(ws.can_post("channel-6"));

        // the seed makes us admin everywhere
        let my_id = me(&ws);
        ws.servers
            .iter_mut()
            .find(|s| s.id == "server-1")
            .unwrap()
            .set_role(&my_id, ServerRole::User)
            .unwrap();
        assert!(!ws.can_post("channel-6"));
        assert!(ws.can_post("channel-1"));
        assert!(!ws.can_post("channel-404"));
    }

    #[test]
    fn test_update_profile_refreshes_memberships() {
        let mut ws = logged_in();
        ws.update_profile(ProfileUpdate {
            name: Some("Countess".to_string()),
            ..Default::default()
        })
        .unwrap();
        let my_id = me(&ws);
        for server in ws.servers() {
            assert_eq!(server.member(&my_id).unwrap().user.name, "Countess");
        }
    }

    #[test]
    fn test_push_message_is_per_channel() {
        let mut ws = logged_in();
        let author = ws.current_user().unwrap().clone();
        ws.push_message("channel-2", "hello", author.clone()).unwrap();
        assert_eq!(ws.messages("channel-2").len(), 1);
        assert_eq!(ws.messages("channel-1").len(), 1);
        assert!(ws.push_message("channel-404", "x", author).is_err());
    }
}
