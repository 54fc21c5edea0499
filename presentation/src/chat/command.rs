//! Slash commands of the chat REPL

use gemchat_domain::{
    ChannelDraft, ChannelIcon, CreateServerData, ProfileUpdate, ServerCategory, ServerRole,
};
use thiserror::Error;

/// Errors from parsing a slash command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidValue(String),

    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    Logout,
    Servers,
    SelectServer(String),
    Channels,
    SelectChannel(String),
    NewServer(CreateServerData),
    NewChannel(ChannelDraft),
    Members,
    Invite { name: String, role: ServerRole },
    Kick { name: String },
    Role { name: String, role: ServerRole },
    RenameServer(String),
    SetCategory(ServerCategory),
    ServerIcon(String),
    /// `None` shows the profile
    Profile(Option<ProfileUpdate>),
    History,
    Api,
}

/// `(usage, description)` for `/help`
pub const COMMANDS: &[(&str, &str)] = &[
    ("/help, /h, /?", "Show this help"),
    ("/servers", "List servers"),
    ("/server <name|number>", "Switch server"),
    ("/channels", "List channels of the current server"),
    ("/channel <name|number>", "Switch channel"),
    (
        "/new-server <name> [--category C] [--description D] [--icon URL] [--channels a,b:ro]",
        "Create a server",
    ),
    (
        "/new-channel <name> [--topic T] [--icon I] [--read-only]",
        "Create a channel in the current server",
    ),
    ("/members", "List members of the current server"),
    ("/invite <name> [admin|user]", "Invite a user to the current server"),
    ("/kick <name>", "Remove a member (owner only)"),
    ("/role <name> <admin|user>", "Change a member's role (owner only)"),
    ("/rename-server <name>", "Rename the current server"),
    ("/category <category>", "Set the current server's category"),
    ("/server-icon <url>", "Set the current server's icon"),
    (
        "/profile [name=N] [role=R] [avatar=URL]",
        "Show or edit your profile",
    ),
    ("/history", "Reprint the current channel"),
    ("/api", "Show the backend API reference"),
    ("/logout", "Log out and drop all data"),
    ("/quit, /exit, /q", "Exit"),
];

impl ReplCommand {
    /// Parse a line starting with `/`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = tokenize(rest)?;

        match name {
            "/help" | "/h" | "/?" => Ok(ReplCommand::Help),
            "/quit" | "/exit" | "/q" => Ok(ReplCommand::Quit),
            "/logout" => Ok(ReplCommand::Logout),
            "/servers" => Ok(ReplCommand::Servers),
            "/server" => Ok(ReplCommand::SelectServer(required(
                &args,
                "/server <name|number>",
            )?)),
            "/channels" => Ok(ReplCommand::Channels),
            "/channel" => Ok(ReplCommand::SelectChannel(required(
                &args,
                "/channel <name|number>",
            )?)),
            "/new-server" => parse_new_server(&args),
            "/new-channel" => parse_new_channel(&args),
            "/members" => Ok(ReplCommand::Members),
            "/invite" => parse_invite(&args),
            "/kick" => Ok(ReplCommand::Kick {
                name: required(&args, "/kick <name>")?,
            }),
            "/role" => parse_role(&args),
            "/rename-server" => Ok(ReplCommand::RenameServer(required(
                &args,
                "/rename-server <name>",
            )?)),
            "/category" => {
                let value = required(&args, "/category <category>")?;
                Ok(ReplCommand::SetCategory(
                    value.parse().map_err(CommandError::InvalidValue)?,
                ))
            }
            "/server-icon" => Ok(ReplCommand::ServerIcon(required(
                &args,
                "/server-icon <url>",
            )?)),
            "/profile" => parse_profile(&args),
            "/history" => Ok(ReplCommand::History),
            "/api" => Ok(ReplCommand::Api),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Split on whitespace, keeping `"quoted text"` together.
fn tokenize(input: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// All positional words joined, or a usage error when there are none.
fn required(args: &[String], usage: &'static str) -> Result<String, CommandError> {
    let joined = args.join(" ");
    if joined.trim().is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(joined)
}

/// Positional words before the first `--flag`, and the remaining tokens.
fn split_flags(args: &[String]) -> (String, &[String]) {
    let at = args
        .iter()
        .position(|a| a.starts_with("--"))
        .unwrap_or(args.len());
    (args[..at].join(" "), &args[at..])
}

fn flag_value<'a>(
    flags: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a String, CommandError> {
    flags
        .next()
        .ok_or_else(|| CommandError::InvalidValue(format!("{} needs a value", flag)))
}

fn parse_new_server(args: &[String]) -> Result<ReplCommand, CommandError> {
    const USAGE: &str =
        "/new-server <name> [--category C] [--description D] [--icon URL] [--channels a,b:ro]";
    let (name, flags) = split_flags(args);
    if name.trim().is_empty() {
        return Err(CommandError::Usage(USAGE));
    }

    let mut data = CreateServerData::new(name);
    let mut flags = flags.iter();
    while let Some(flag) = flags.next() {
        match flag.as_str() {
            "--category" => {
                let value = flag_value(&mut flags, flag)?;
                data.category = Some(value.parse().map_err(CommandError::InvalidValue)?);
            }
            "--description" => {
                data.description = Some(flag_value(&mut flags, flag)?.clone());
            }
            "--icon" => data.icon_url = Some(flag_value(&mut flags, flag)?.clone()),
            "--channels" => {
                data.channels = parse_channel_list(flag_value(&mut flags, flag)?);
            }
            _ => return Err(CommandError::Usage(USAGE)),
        }
    }
    Ok(ReplCommand::NewServer(data))
}

/// `general,news:ro` -> drafts; a `:ro` suffix makes the channel read-only.
fn parse_channel_list(value: &str) -> Vec<ChannelDraft> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|spec| match spec.strip_suffix(":ro") {
            Some(name) => ChannelDraft::new(name).read_only(),
            None => ChannelDraft::new(spec),
        })
        .collect()
}

fn parse_new_channel(args: &[String]) -> Result<ReplCommand, CommandError> {
    const USAGE: &str = "/new-channel <name> [--topic T] [--icon I] [--read-only]";
    let (name, flags) = split_flags(args);
    if name.trim().is_empty() {
        return Err(CommandError::Usage(USAGE));
    }

    let mut draft = ChannelDraft::new(&name);
    let mut flags = flags.iter();
    while let Some(flag) = flags.next() {
        match flag.as_str() {
            "--topic" => draft = draft.with_topic(flag_value(&mut flags, flag)?.clone()),
            "--icon" => {
                let icon = flag_value(&mut flags, flag)?
                    .parse::<ChannelIcon>()
                    .unwrap_or_default();
                draft = draft.with_icon(icon);
            }
            "--read-only" => draft = draft.read_only(),
            _ => return Err(CommandError::Usage(USAGE)),
        }
    }
    Ok(ReplCommand::NewChannel(draft))
}

fn parse_role_value(value: &str) -> Result<ServerRole, CommandError> {
    value.parse().map_err(CommandError::InvalidValue)
}

fn parse_invite(args: &[String]) -> Result<ReplCommand, CommandError> {
    const USAGE: &str = "/invite <name> [admin|user]";
    match args {
        [] => Err(CommandError::Usage(USAGE)),
        [name] => Ok(ReplCommand::Invite {
            name: name.clone(),
            role: ServerRole::User,
        }),
        [name @ .., role] => match role.parse::<ServerRole>() {
            Ok(role) => Ok(ReplCommand::Invite {
                name: name.join(" "),
                role,
            }),
            Err(_) => Ok(ReplCommand::Invite {
                name: args.join(" "),
                role: ServerRole::User,
            }),
        },
    }
}

fn parse_role(args: &[String]) -> Result<ReplCommand, CommandError> {
    const USAGE: &str = "/role <name> <admin|user>";
    match args {
        [name @ .., role] if !name.is_empty() => Ok(ReplCommand::Role {
            name: name.join(" "),
            role: parse_role_value(role)?,
        }),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn parse_profile(args: &[String]) -> Result<ReplCommand, CommandError> {
    const USAGE: &str = "/profile [name=N] [role=R] [avatar=URL]";
    if args.is_empty() {
        return Ok(ReplCommand::Profile(None));
    }

    let mut update = ProfileUpdate::default();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or(CommandError::Usage(USAGE))?;
        let value = value.to_string();
        match key {
            "name" => update.name = Some(value),
            "role" => update.role = Some(value),
            "avatar" => update.avatar_url = Some(value),
            _ => return Err(CommandError::Usage(USAGE)),
        }
    }
    Ok(ReplCommand::Profile(Some(update)))
}
