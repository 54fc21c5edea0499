//! REPL (Read-Eval-Print Loop) for the chat workspace

use crate::chat::command::{COMMANDS, CommandError, ReplCommand};
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use gemchat_application::{PostMessageUseCase, PostOutcome};
use gemchat_domain::{DomainError, UpdateServerData, Workspace, api_reference};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::{debug, info};

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Logout,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    workspace: Workspace,
    post: PostMessageUseCase,
    output: OutputConfig,
    repl: ReplConfig,
}

impl ChatRepl {
    pub fn new(post: PostMessageUseCase) -> Self {
        Self {
            workspace: Workspace::new(),
            post,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    pub fn with_output_config(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        if !self.output.color {
            colored::control::set_override(false);
        }
        let mut rl = DefaultEditor::new()?;

        let history_path = self.repl.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_banner();
        let mut username = self.repl.username.clone();

        'session: loop {
            if !self.login(&mut rl, username.take())? {
                break;
            }

            loop {
                let prompt = self.prompt();
                match rl.readline(&prompt) {
                    Ok(line) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let _ = rl.add_history_entry(line);

                        if line.starts_with('/') {
                            match self.handle_line(&mut rl, line).await? {
                                Flow::Continue => {}
                                Flow::Logout => continue 'session,
                                Flow::Quit => break 'session,
                            }
                            continue;
                        }

                        self.post_message(line).await;
                    }
                    Err(ReadlineError::Interrupted) => {
                        println!("^C");
                        continue;
                    }
                    Err(ReadlineError::Eof) => {
                        println!("Bye!");
                        break 'session;
                    }
                    Err(err) => {
                        eprintln!("Error: {:?}", err);
                        break 'session;
                    }
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 Gemini Chat                 │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
    }

    fn prompt(&self) -> String {
        match self.workspace.active_channel() {
            Some(channel) => format!("#{}> ", channel.name),
            None => "> ".to_string(),
        }
    }

    /// Log in with `username`, or prompt for one. Returns false on EOF.
    fn login(&mut self, rl: &mut DefaultEditor, username: Option<String>) -> RlResult<bool> {
        let mut username = username;
        loop {
            let name = match username.take() {
                Some(name) => name,
                None => match rl.readline("Username: ") {
                    Ok(name) => name,
                    Err(ReadlineError::Interrupted) => continue,
                    Err(ReadlineError::Eof) => return Ok(false),
                    Err(err) => return Err(err),
                },
            };

            match self.workspace.login(&name) {
                Ok(user) => {
                    info!(user = %user.id, "Logged in");
                    println!(
                        "{}",
                        ConsoleFormatter::notice(format!("Welcome, {}!", user.name))
                    );
                    println!("Type /help for commands.\n");
                    self.print_channel();
                    return Ok(true);
                }
                Err(e) => println!("{}", ConsoleFormatter::error(e)),
            }
        }
    }

    async fn handle_line(&mut self, rl: &mut DefaultEditor, line: &str) -> RlResult<Flow> {
        let command = match ReplCommand::parse(line) {
            Ok(command) => command,
            Err(e @ CommandError::Unknown(_)) => {
                println!("{}", e);
                println!("Type /help for available commands");
                return Ok(Flow::Continue);
            }
            Err(e) => {
                println!("{}", ConsoleFormatter::error(e));
                return Ok(Flow::Continue);
            }
        };

        let confirmed = match &command {
            ReplCommand::Logout => confirm(
                rl,
                "Log out? All servers, channels and messages will be lost.",
            )?,
            ReplCommand::Kick { name } => {
                if let Err(e) = self.kick_target(name) {
                    println!("{}", ConsoleFormatter::error(e));
                    return Ok(Flow::Continue);
                }
                confirm(rl, &format!("Remove {} from this server?", name))?
            }
            _ => true,
        };
        if !confirmed {
            println!("{}", "Cancelled.".dimmed());
            return Ok(Flow::Continue);
        }

        let flow = match self.execute(command) {
            Ok((flow, text)) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
                flow
            }
            Err(e) => {
                println!("{}", ConsoleFormatter::error(e));
                Flow::Continue
            }
        };

        if flow == Flow::Logout {
            self.post.dispatcher().sessions().clear().await;
        }
        Ok(flow)
    }

    /// Apply a command to the workspace, returning what to print.
    fn execute(&mut self, command: ReplCommand) -> Result<(Flow, String), DomainError> {
        let text = match command {
            ReplCommand::Help => ConsoleFormatter::format_help(COMMANDS),
            ReplCommand::Quit => {
                println!("Bye!");
                return Ok((Flow::Quit, String::new()));
            }
            ReplCommand::Logout => {
                self.workspace.logout();
                info!("Logged out");
                return Ok((Flow::Logout, ConsoleFormatter::notice("Logged out.")));
            }
            ReplCommand::Servers => {
                ConsoleFormatter::format_servers(&self.workspace, &self.viewer_id()?)
            }
            ReplCommand::SelectServer(query) => {
                let id = self
                    .workspace
                    .resolve_server(&query)
                    .map(|s| s.id.clone())
                    .ok_or(DomainError::ServerNotFound(query))?;
                self.workspace.select_server(&id)?;
                self.channel_view()
            }
            ReplCommand::Channels => ConsoleFormatter::format_channels(&self.workspace),
            ReplCommand::SelectChannel(query) => {
                let id = self
                    .workspace
                    .resolve_channel(&query)
                    .map(|c| c.id.clone())
                    .ok_or(DomainError::ChannelNotFound(query))?;
                self.workspace.select_channel(&id)?;
                self.channel_view()
            }
            ReplCommand::NewServer(data) => {
                let name = self.workspace.create_server(data)?.name.clone();
                format!(
                    "{}\n{}",
                    ConsoleFormatter::notice(format!("Created server {}.", name)),
                    self.channel_view()
                )
            }
            ReplCommand::NewChannel(draft) => {
                let name = self.workspace.create_channel(draft)?.name.clone();
                format!(
                    "{}\n{}",
                    ConsoleFormatter::notice(format!("Created #{}.", name)),
                    self.channel_view()
                )
            }
            ReplCommand::Members => {
                let viewer = self.viewer_id()?;
                let server = self.active_server()?;
                ConsoleFormatter::format_members(server, &viewer)
            }
            ReplCommand::Invite { name, role } => {
                let server_id = self.active_server()?.id.clone();
                let user = self.workspace.invite_member(&server_id, &name, role)?;
                ConsoleFormatter::notice(format!("Invited {} as {}.", user.name, role))
            }
            ReplCommand::Kick { name } => {
                let (server_id, user_id) = self.kick_target(&name)?;
                let member = self.workspace.remove_member(&server_id, &user_id)?;
                ConsoleFormatter::notice(format!("Removed {}.", member.user.name))
            }
            ReplCommand::Role { name, role } => {
                let (server_id, user_id) = self.member_by_name(&name)?;
                self.workspace
                    .change_member_role(&server_id, &user_id, role)?;
                ConsoleFormatter::notice(format!("{} is now {}.", name, role))
            }
            ReplCommand::RenameServer(name) => self.update_server(UpdateServerData {
                name: Some(name),
                ..Default::default()
            })?,
            ReplCommand::SetCategory(category) => self.update_server(UpdateServerData {
                category: Some(category),
                ..Default::default()
            })?,
            ReplCommand::ServerIcon(url) => self.update_server(UpdateServerData {
                icon_url: Some(url),
                ..Default::default()
            })?,
            ReplCommand::Profile(None) => {
                let user = self
                    .workspace
                    .current_user()
                    .ok_or(DomainError::NotLoggedIn)?;
                ConsoleFormatter::format_profile(user)
            }
            ReplCommand::Profile(Some(update)) => {
                let user = self.workspace.update_profile(update)?;
                ConsoleFormatter::format_profile(user)
            }
            ReplCommand::History => self.channel_view(),
            ReplCommand::Api => ConsoleFormatter::format_api_reference(&api_reference()),
        };
        Ok((Flow::Continue, text))
    }

    fn viewer_id(&self) -> Result<String, DomainError> {
        self.workspace
            .current_user()
            .map(|u| u.id.clone())
            .ok_or(DomainError::NotLoggedIn)
    }

    fn active_server(&self) -> Result<&gemchat_domain::Server, DomainError> {
        self.workspace
            .active_server()
            .ok_or(DomainError::NoActiveServer)
    }

    /// `(server_id, user_id)` of a member of the active server, by name.
    fn member_by_name(&self, name: &str) -> Result<(String, String), DomainError> {
        let server = self.active_server()?;
        let member = server
            .members
            .iter()
            .find(|m| m.user.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DomainError::UserNotFound(name.to_string()))?;
        Ok((server.id.clone(), member.user.id.clone()))
    }

    /// Member `name` of the active server, if the viewer may remove them.
    fn kick_target(&self, name: &str) -> Result<(String, String), DomainError> {
        let (server_id, user_id) = self.member_by_name(name)?;
        self.workspace.check_owner_action(&server_id, &user_id)?;
        Ok((server_id, user_id))
    }

    fn update_server(&mut self, update: UpdateServerData) -> Result<String, DomainError> {
        let server_id = self.active_server()?.id.clone();
        let server = self.workspace.update_server(&server_id, update)?;
        debug!(server = %server.id, "Updated server");
        Ok(ConsoleFormatter::notice(format!(
            "Updated {} ({}).",
            server.name,
            server
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "no category".to_string())
        )))
    }

    /// Header and history of the active channel.
    fn channel_view(&self) -> String {
        let Some(channel) = self.workspace.active_channel() else {
            return format!("{}", "This server has no channels.".dimmed());
        };
        let viewer = self
            .workspace
            .current_user()
            .map(|u| u.id.as_str())
            .unwrap_or_default();
        let read_only = !self.workspace.can_post(&channel.id);
        format!(
            "{}\n\n{}\n",
            ConsoleFormatter::format_channel_header(channel, read_only),
            ConsoleFormatter::format_history(
                self.workspace.messages(&channel.id),
                viewer,
                self.output.timestamps
            )
        )
    }

    fn print_channel(&self) {
        println!("{}", self.channel_view());
    }

    async fn post_message(&mut self, content: &str) {
        let viewer = self.viewer_id().unwrap_or_default();
        match self.post.execute(&mut self.workspace, content).await {
            Ok(PostOutcome::Ignored) => {}
            Ok(PostOutcome::Replied { reply, .. }) => {
                println!(
                    "{}",
                    ConsoleFormatter::format_message(&reply, &viewer, self.output.timestamps)
                );
            }
            Ok(PostOutcome::Failed {
                fallback, error, ..
            }) => {
                println!("{}", ConsoleFormatter::error(error));
                println!(
                    "{}",
                    ConsoleFormatter::format_message(&fallback, &viewer, self.output.timestamps)
                );
            }
            Err(e) => println!("{}", ConsoleFormatter::error(e)),
        }
    }
}

/// Ask a y/N question; anything but y/yes is a no.
fn confirm(rl: &mut DefaultEditor, question: &str) -> RlResult<bool> {
    match rl.readline(&format!("{} [y/N] ", question)) {
        Ok(answer) => Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        )),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gemchat_application::{
        BotConfig, GatewayError, LlmGateway, LlmSession, SendMessageUseCase,
    };
    use gemchat_domain::{ChatTurn, ServerCategory, ServerRole};
    use std::sync::Arc;

    struct NoopGateway;

    #[async_trait]
    impl LlmGateway for NoopGateway {
        async fn create_session(
            &self,
            _channel_id: &str,
            _seed: &[ChatTurn],
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Err(GatewayError::Other("offline".to_string()))
        }
    }

    fn repl() -> ChatRepl {
        colored::control::set_override(false);
        let post = PostMessageUseCase::new(
            SendMessageUseCase::new(Arc::new(NoopGateway)),
            BotConfig::default(),
        );
        let mut repl = ChatRepl::new(post);
        repl.workspace.login("Ada").unwrap();
        repl
    }

    fn run(repl: &mut ChatRepl, line: &str) -> Result<String, DomainError> {
        let command = ReplCommand::parse(line).unwrap();
        repl.execute(command).map(|(_, text)| text)
    }

    #[test]
    fn test_prompt_shows_channel() {
        let repl = repl();
        assert_eq!(repl.prompt(), "#welcome> ");
    }

    #[test]
    fn test_switch_server_and_channel() {
        let mut repl = repl();
        let view = run(&mut repl, "/server 2").unwrap();
        assert!(view.contains("#frontend-dev"));
        assert_eq!(repl.prompt(), "#frontend-dev> ");

        run(&mut repl, "/channel #backend-dev").unwrap();
        assert_eq!(repl.prompt(), "#backend-dev> ");

        assert_eq!(
            run(&mut repl, "/channel nope"),
            Err(DomainError::ChannelNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_new_server_switches_to_it() {
        let mut repl = repl();
        let text = run(&mut repl, "/new-server Book Club --category hobby").unwrap();
        assert!(text.contains("Created server Book Club."));
        assert_eq!(repl.workspace().active_server().unwrap().name, "Book Club");
        assert_eq!(repl.prompt(), "#general> ");
    }

    #[test]
    fn test_invite_then_kick_and_role() {
        let mut repl = repl();
        run(&mut repl, "/server Random Chats").unwrap();
        run(&mut repl, "/invite Diana admin").unwrap();

        let server = repl.workspace().active_server().unwrap();
        let diana = server.members.iter().find(|m| m.user.name == "Diana").unwrap();
        assert_eq!(diana.role, ServerRole::Admin);

        run(&mut repl, "/role diana user").unwrap();
        run(&mut repl, "/kick Diana").unwrap();
        assert_eq!(repl.workspace().active_server().unwrap().members.len(), 1);
    }

    #[test]
    fn test_kick_requires_ownership() {
        let mut repl = repl();
        run(&mut repl, "/server Project Discussions").unwrap();
        let err = run(&mut repl, "/kick Diana").unwrap_err();
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_kick_target_checked_before_confirmation() {
        let mut repl = repl();
        assert_eq!(
            repl.kick_target("Zed"),
            Err(DomainError::UserNotFound("Zed".to_string()))
        );
        assert!(repl.kick_target("Ada").unwrap_err().is_permission_denied());
        assert_eq!(repl.kick_target("alice").unwrap().1, "user-2");

        run(&mut repl, "/server Project Discussions").unwrap();
        assert!(repl.kick_target("Diana").unwrap_err().is_permission_denied());
    }

    #[test]
    fn test_server_settings() {
        let mut repl = repl();
        run(&mut repl, "/rename-server Gemini HQ").unwrap();
        run(&mut repl, "/category team").unwrap();

        let server = repl.workspace().active_server().unwrap();
        assert_eq!(server.name, "Gemini HQ");
        assert_eq!(server.category, Some(ServerCategory::Team));
    }

    #[test]
    fn test_profile_edit() {
        let mut repl = repl();
        let text = run(&mut repl, "/profile name=Countess").unwrap();
        assert!(text.contains("Countess"));
        assert_eq!(repl.workspace().current_user().unwrap().name, "Countess");
    }

    #[test]
    fn test_logout_drops_workspace() {
        let mut repl = repl();
        let (flow, _) = repl.execute(ReplCommand::Logout).unwrap();
        assert_eq!(flow, Flow::Logout);
        assert!(!repl.workspace().is_logged_in());
        assert_eq!(repl.prompt(), "> ");
    }

    #[tokio::test]
    async fn test_post_failure_appends_fallback() {
        let mut repl = repl();
        repl.post_message("hello").await;

        let messages = repl.workspace().messages("channel-1");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, BotConfig::default().fallback_reply);
    }
}
