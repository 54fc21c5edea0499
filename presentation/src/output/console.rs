//! Console output formatter for the chat workspace

use colored::Colorize;
use gemchat_domain::{
    ApiReference, Channel, ChannelIcon, EventDirection, Member, Message, Server, User, Workspace,
};

/// Marker shown next to a server owner.
const OWNER_MARK: &str = "♛";

/// Formats workspace state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One chat line: `[14:05] Gemini: text`
    pub fn format_message(message: &Message, viewer_id: &str, timestamps: bool) -> String {
        let author = &message.author;
        let name = if author.is_bot() {
            author.name.magenta().bold()
        } else if author.id == viewer_id {
            author.name.green().bold()
        } else {
            author.name.cyan().bold()
        };

        let mut line = String::new();
        if timestamps {
            let local = message.timestamp.with_timezone(&chrono::Local);
            line.push_str(&format!("{} ", format!("[{}]", local.format("%H:%M")).dimmed()));
        }
        line.push_str(&format!("{}: ", name));

        // continuation lines line up under the text
        let mut lines = message.content.lines();
        if let Some(first) = lines.next() {
            line.push_str(first);
        }
        for rest in lines {
            line.push_str("\n    ");
            line.push_str(rest);
        }
        line
    }

    pub fn format_history(messages: &[Message], viewer_id: &str, timestamps: bool) -> String {
        if messages.is_empty() {
            return format!("{}", "No messages yet.".dimmed());
        }
        messages
            .iter()
            .map(|m| Self::format_message(m, viewer_id, timestamps))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn channel_glyph(icon: &ChannelIcon) -> &str {
        match icon {
            ChannelIcon::Chat => "💬",
            ChannelIcon::Code => "💻",
            ChannelIcon::Gaming => "🎮",
            ChannelIcon::Book => "📚",
            ChannelIcon::Custom(s) => s,
        }
    }

    /// Banner printed when entering a channel.
    pub fn format_channel_header(channel: &Channel, read_only: bool) -> String {
        let mut header = format!(
            "{} {}",
            Self::channel_glyph(&channel.icon),
            format!("#{}", channel.name).bold()
        );
        if let Some(topic) = &channel.topic {
            header.push_str(&format!(" {} {}", "|".dimmed(), topic.dimmed()));
        }
        if read_only {
            header.push_str(&format!(
                "\n{}",
                "This channel is read-only. Only admins can post.".yellow()
            ));
        }
        header
    }

    /// Numbered server list; the active one is starred.
    pub fn format_servers(workspace: &Workspace, viewer_id: &str) -> String {
        let active = workspace.active_server().map(|s| s.id.as_str());
        let mut output = format!("{}\n", "Servers:".cyan().bold());
        for (i, server) in workspace.servers().iter().enumerate() {
            let marker = if Some(server.id.as_str()) == active {
                "*".green().bold()
            } else {
                " ".normal()
            };
            let owner = if server.is_owner(viewer_id) {
                format!(" {}", OWNER_MARK.yellow())
            } else {
                String::new()
            };
            let category = server
                .category
                .map(|c| format!(" ({})", c).dimmed().to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "{} {:>2}. {}{}{}\n",
                marker,
                i + 1,
                server.name,
                category,
                owner
            ));
        }
        output
    }

    /// Numbered channel list of the active server.
    pub fn format_channels(workspace: &Workspace) -> String {
        let Some(server) = workspace.active_server() else {
            return format!("{}", "No server selected.".dimmed());
        };
        let active = workspace.active_channel_id();
        let mut output = format!("{}\n", format!("{} channels:", server.name).cyan().bold());
        for (i, channel) in workspace.server_channels().iter().enumerate() {
            let marker = if Some(channel.id.as_str()) == active {
                "*".green().bold()
            } else {
                " ".normal()
            };
            let read_only = if channel.is_read_only() {
                format!(" {}", "(read-only)".yellow())
            } else {
                String::new()
            };
            output.push_str(&format!(
                "{} {:>2}. {} #{}{}\n",
                marker,
                i + 1,
                Self::channel_glyph(&channel.icon),
                channel.name,
                read_only
            ));
        }
        output
    }

    pub fn format_member(server: &Server, member: &Member, viewer_id: &str) -> String {
        let mut line = member.user.name.bold().to_string();
        if member.user.id == viewer_id {
            line.push_str(&format!(" {}", "(you)".dimmed()));
        }
        if server.is_owner(&member.user.id) {
            line.push_str(&format!(" {}", OWNER_MARK.yellow()));
        }
        let role = if member.role.is_admin() {
            member.role.as_str().red().to_string()
        } else {
            member.role.as_str().normal().to_string()
        };
        line.push_str(&format!(" [{}]", role));
        if let Some(title) = &member.user.role {
            line.push_str(&format!(" {}", title.dimmed()));
        }
        line
    }

    pub fn format_members(server: &Server, viewer_id: &str) -> String {
        let mut output = format!(
            "{}\n",
            format!("Members of {} ({}):", server.name, server.members.len())
                .cyan()
                .bold()
        );
        for member in &server.members {
            output.push_str(&format!("  {}\n", Self::format_member(server, member, viewer_id)));
        }
        output
    }

    pub fn format_profile(user: &User) -> String {
        format!(
            "{}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n",
            "Profile:".cyan().bold(),
            "id:    ".dimmed(),
            user.id,
            "name:  ".dimmed(),
            user.name,
            "role:  ".dimmed(),
            user.role.as_deref().unwrap_or("-"),
            "avatar:".dimmed(),
            user.avatar_url
        )
    }

    pub fn format_api_reference(reference: &ApiReference) -> String {
        let mut output = format!("{}\n", "Backend API reference".cyan().bold());
        output.push_str(&format!("Auth: {}\n", reference.auth_header));
        output.push_str(&format!("Errors: {}\n", reference.error_format));

        let mut group = "";
        for endpoint in &reference.endpoints {
            if endpoint.group != group {
                group = endpoint.group;
                output.push_str(&format!("\n{}\n", group.yellow().bold()));
            }
            output.push_str(&format!(
                "  {:<6} {:<40} {}\n",
                endpoint.method.as_str(),
                endpoint.path,
                endpoint.description.dimmed()
            ));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "WebSocket".yellow().bold(),
            reference.socket_url
        ));
        for event in &reference.events {
            let arrow = match event.direction {
                EventDirection::ClientToServer => "->",
                EventDirection::ServerToClient => "<-",
            };
            output.push_str(&format!(
                "  {} {:<20} {}\n",
                arrow,
                event.name,
                event.description.dimmed()
            ));
        }
        output
    }

    pub fn format_help(commands: &[(&str, &str)]) -> String {
        let width = commands.iter().map(|(u, _)| u.len()).max().unwrap_or(0);
        let mut output = format!("{}\n", "Commands:".cyan().bold());
        for (usage, description) in commands {
            output.push_str(&format!("  {:<width$}  {}\n", usage, description, width = width));
        }
        output.push_str("\nAnything else is posted to the current channel.\n");
        output
    }

    pub fn error(message: impl std::fmt::Display) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    pub fn notice(message: impl std::fmt::Display) -> String {
        format!("{}", message.to_string().green())
    }
}
