//! Mock data loaded at login.
//!
//! There is no backend: the directory of known users, the starter servers and
//! their channels are created here every time someone logs in.

use crate::channel::entities::{Channel, ChannelIcon, ChannelPermissions};
use crate::core::string::dicebear_url;
use crate::server::entities::{Member, Server};
use crate::server::value_objects::{ServerCategory, ServerRole};
use crate::user::entities::User;

/// Text of the bot message posted in the first channel after login.
pub const WELCOME_MESSAGE: &str =
    "Welcome to Gemini Chat! This is the #welcome channel. Feel free to ask me anything.";

/// Users that can be invited by name.
pub fn directory() -> Vec<User> {
    [
        ("user-2", "Alice", "Backend Developer"),
        ("user-3", "Bob", "UI/UX Designer"),
        ("user-4", "Charlie", "Project Manager"),
        ("user-5", "Diana", "QA Engineer"),
    ]
    .into_iter()
    .map(|(id, name, role)| User::new(id, name).with_role(role))
    .collect()
}

/// Starter servers for `current`, using members from `directory`.
pub fn servers(current: &User, directory: &[User]) -> Vec<Server> {
    let known = |index: usize| directory.get(index).cloned();
    let members = |extra: Vec<(Option<User>, ServerRole)>| {
        let mut members = vec![Member::new(current.clone(), ServerRole::Admin)];
        members.extend(
            extra
                .into_iter()
                .filter_map(|(user, role)| user.map(|u| Member::new(u, role))),
        );
        members
    };

    vec![
        Server {
            id: "server-1".to_string(),
            name: "Gemini General".to_string(),
            icon_url: String::new(),
            category: Some(ServerCategory::General),
            description: None,
            owner_id: current.id.clone(),
            members: members(vec![
                (known(0), ServerRole::User),
                (known(1), ServerRole::User),
            ]),
        },
        Server {
            id: "server-2".to_string(),
            name: "Project Discussions".to_string(),
            icon_url: dicebear_url("shapes", "Projects"),
            category: Some(ServerCategory::Project),
            description: None,
            owner_id: known(2).map(|u| u.id).unwrap_or_default(),
            members: members(vec![
                (known(2), ServerRole::Admin),
                (known(3), ServerRole::User),
            ]),
        },
        Server {
            id: "server-3".to_string(),
            name: "Random Chats".to_string(),
            icon_url: dicebear_url("shapes", "Random"),
            category: Some(ServerCategory::Hobby),
            description: None,
            owner_id: current.id.clone(),
            members: members(vec![]),
        },
    ]
}

/// Starter channels of the starter servers.
pub fn channels() -> Vec<Channel> {
    let channel = |id: &str,
                   name: &str,
                   server_id: &str,
                   icon: ChannelIcon,
                   topic: Option<&str>,
                   permissions: ChannelPermissions| Channel {
        id: id.to_string(),
        name: name.to_string(),
        server_id: server_id.to_string(),
        icon,
        topic: topic.map(str::to_string),
        permissions,
    };

    vec![
        channel(
            "channel-1",
            "welcome",
            "server-1",
            ChannelIcon::Chat,
            Some("Say hello and introduce yourself!"),
            ChannelPermissions::ReadWrite,
        ),
        channel(
            "channel-2",
            "general-chat",
            "server-1",
            ChannelIcon::Chat,
            None,
            ChannelPermissions::ReadWrite,
        ),
        channel(
            "channel-3",
            "frontend-dev",
            "server-2",
            ChannelIcon::Code,
            Some("All about React, CSS, and modern web dev."),
            ChannelPermissions::ReadWrite,
        ),
        channel(
            "channel-4",
            "backend-dev",
            "server-2",
            ChannelIcon::Code,
            None,
            ChannelPermissions::ReadWrite,
        ),
        channel(
            "channel-5",
            "memes",
            "server-3",
            ChannelIcon::Gaming,
            Some("Only the dankest memes allowed."),
            ChannelPermissions::ReadWrite,
        ),
        channel(
            "channel-6",
            "announcements",
            "server-1",
            ChannelIcon::Chat,
            Some("Important announcements from the admin team."),
            ChannelPermissions::ReadOnly,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_channel_belongs_to_a_seeded_server() {
        let me = User::login("user-1", "Ada");
        let servers = servers(&me, &directory());
        for channel in channels() {
            assert!(servers.iter().any(|s| s.id == channel.server_id));
        }
    }

    #[test]
    fn test_current_user_is_admin_everywhere() {
        let me = User::login("user-1", "Ada");
        for server in servers(&me, &directory()) {
            assert_eq!(server.role_of("user-1"), Some(ServerRole::Admin));
        }
    }

    #[test]
    fn test_project_server_owned_by_charlie() {
        let me = User::login("user-1", "Ada");
        let servers = servers(&me, &directory());
        assert_eq!(servers[1].owner_id, "user-4");
        assert!(!servers[1].is_owner("user-1"));
    }

    #[test]
    fn test_announcements_is_read_only() {
        let announcements = channels()
            .into_iter()
            .find(|c| c.name == "announcements")
            .unwrap();
        assert!(announcements.is_read_only());
    }
}
