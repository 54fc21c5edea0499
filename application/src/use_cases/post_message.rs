//! Post Message use case.
//!
//! Posts the current user's message to the active channel and appends the
//! bot's answer (or the fallback reply when the AI call fails).

use crate::config::BotConfig;
use crate::ports::progress::{NoReplyProgress, ReplyProgressNotifier};
use crate::use_cases::send_message::{SendMessageInput, SendMessageUseCase};
use gemchat_domain::{DomainError, Message, User, Workspace, history_for};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while posting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostMessageError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("#{0} is read-only")]
    ReadOnlyChannel(String),
}

/// What happened to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Blank content, nothing posted
    Ignored,
    /// The bot answered
    Replied { message: Message, reply: Message },
    /// The AI call failed and the fallback reply was posted
    Failed {
        message: Message,
        fallback: Message,
        error: String,
    },
}

impl PostOutcome {
    /// Messages appended to the channel, in order.
    pub fn posted(&self) -> Vec<&Message> {
        match self {
            PostOutcome::Ignored => Vec::new(),
            PostOutcome::Replied { message, reply } => vec![message, reply],
            PostOutcome::Failed {
                message, fallback, ..
            } => vec![message, fallback],
        }
    }
}

/// Use case for posting in the active channel.
pub struct PostMessageUseCase {
    dispatcher: SendMessageUseCase,
    bot: BotConfig,
    progress: Arc<dyn ReplyProgressNotifier>,
}

impl PostMessageUseCase {
    pub fn new(dispatcher: SendMessageUseCase, bot: BotConfig) -> Self {
        Self {
            dispatcher,
            bot,
            progress: Arc::new(NoReplyProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ReplyProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn dispatcher(&self) -> &SendMessageUseCase {
        &self.dispatcher
    }

    pub async fn execute(
        &self,
        workspace: &mut Workspace,
        content: &str,
    ) -> Result<PostOutcome, PostMessageError> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(PostOutcome::Ignored);
        }

        let author = workspace
            .current_user()
            .cloned()
            .ok_or(DomainError::NotLoggedIn)?;
        let channel = workspace
            .active_channel()
            .ok_or(DomainError::NoActiveChannel)?;
        let channel_id = channel.id.clone();
        if !workspace.can_post(&channel_id) {
            return Err(PostMessageError::ReadOnlyChannel(channel.name.clone()));
        }

        let prior_history = history_for(workspace.messages(&channel_id), &author.id);
        let message = workspace
            .push_message(&channel_id, content, author)?
            .clone();
        debug!(channel = %channel_id, history = prior_history.len(), "Posted message");

        self.progress.on_reply_start(&channel_id);
        let result = self
            .dispatcher
            .execute(SendMessageInput::new(
                channel_id.clone(),
                content,
                prior_history,
            ))
            .await;
        self.progress.on_reply_end(&channel_id, result.is_ok());

        match result {
            Ok(text) => {
                let reply = workspace
                    .push_message(&channel_id, text, User::bot())?
                    .clone();
                Ok(PostOutcome::Replied { message, reply })
            }
            Err(e) => {
                info!(channel = %channel_id, "Posting fallback reply");
                let fallback = workspace
                    .push_message(&channel_id, self.bot.fallback_reply.as_str(), User::bot())?
                    .clone();
                Ok(PostOutcome::Failed {
                    message,
                    fallback,
                    error: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
    use async_trait::async_trait;
    use gemchat_domain::{BOT_USER_ID, ChatTurn, TurnRole};
    use std::sync::Mutex;

    struct FixedSession {
        reply: Result<String, GatewayError>,
    }

    #[async_trait]
    impl LlmSession for FixedSession {
        fn id(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            self.reply.clone()
        }
    }

    struct FixedGateway {
        reply: Result<String, GatewayError>,
        seeds: Mutex<Vec<Vec<ChatTurn>>>,
    }

    impl FixedGateway {
        fn new(reply: Result<String, GatewayError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seeds: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn create_session(
            &self,
            _channel_id: &str,
            seed: &[ChatTurn],
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            self.seeds.lock().unwrap().push(seed.to_vec());
            Ok(Box::new(FixedSession {
                reply: self.reply.clone(),
            }))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        calls: Mutex<Vec<String>>,
    }

    impl ReplyProgressNotifier for RecordingProgress {
        fn on_reply_start(&self, channel_id: &str) {
            self.calls.lock().unwrap().push(format!("start {}", channel_id));
        }

        fn on_reply_end(&self, channel_id: &str, success: bool) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("end {} {}", channel_id, success));
        }
    }

    fn use_case(gateway: Arc<FixedGateway>) -> PostMessageUseCase {
        PostMessageUseCase::new(SendMessageUseCase::new(gateway), BotConfig::default())
    }

    fn workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.login("Ada").unwrap();
        ws
    }

    #[tokio::test]
    async fn test_reply_is_appended_after_message() {
        let gateway = FixedGateway::new(Ok("Hi Ada!".to_string()));
        let mut ws = workspace();

        let outcome = use_case(gateway).execute(&mut ws, "  hello  ").await.unwrap();

        let PostOutcome::Replied { message, reply } = outcome else {
            panic!("expected a reply");
        };
        assert_eq!(message.content, "hello");
        assert_eq!(reply.content, "Hi Ada!");
        assert_eq!(reply.author.id, BOT_USER_ID);

        let channel_id = ws.active_channel_id().unwrap().to_string();
        let contents: Vec<_> = ws
            .messages(&channel_id)
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents.len(), 3);
        assert_eq!(&contents[1..], ["hello", "Hi Ada!"]);
    }

    #[tokio::test]
    async fn test_seed_is_history_before_message() {
        let gateway = FixedGateway::new(Ok("ok".to_string()));
        let mut ws = workspace();

        use_case(gateway.clone())
            .execute(&mut ws, "hello")
            .await
            .unwrap();

        let seeds = gateway.seeds.lock().unwrap();
        assert_eq!(seeds.len(), 1);
        // only the welcome message, spoken by the bot
        assert_eq!(seeds[0].len(), 1);
        assert_eq!(seeds[0][0].role, TurnRole::Assistant);
    }

    #[tokio::test]
    async fn test_failure_posts_fallback() {
        let gateway = FixedGateway::new(Err(GatewayError::RequestFailed("HTTP 400".into())));
        let mut ws = workspace();

        let outcome = use_case(gateway).execute(&mut ws, "hello").await.unwrap();

        let PostOutcome::Failed { fallback, error, .. } = outcome else {
            panic!("expected a failure");
        };
        assert_eq!(
            fallback.content,
            "Sorry, I couldn't process that. Please check your API key and try again."
        );
        assert_eq!(error, "Failed to get a response from the AI.");
    }

    #[tokio::test]
    async fn test_blank_content_is_ignored() {
        let gateway = FixedGateway::new(Ok("unused".to_string()));
        let mut ws = workspace();

        let outcome = use_case(gateway.clone()).execute(&mut ws, "   ").await.unwrap();

        assert_eq!(outcome, PostOutcome::Ignored);
        assert!(outcome.posted().is_empty());
        assert!(gateway.seeds.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_requires_login() {
        let gateway = FixedGateway::new(Ok("unused".to_string()));
        let mut ws = Workspace::new();

        let err = use_case(gateway).execute(&mut ws, "hello").await.unwrap_err();

        assert_eq!(err, PostMessageError::Domain(DomainError::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_admin_may_post_in_read_only_channel() {
        let gateway = FixedGateway::new(Ok("noted".to_string()));
        let mut ws = workspace();
        ws.select_channel("channel-6").unwrap();
        assert!(ws.active_channel().unwrap().is_read_only());

        let outcome = use_case(gateway).execute(&mut ws, "release on friday").await.unwrap();

        assert_eq!(outcome.posted().len(), 2);
        assert_eq!(ws.messages("channel-6").len(), 2);
    }

    #[tokio::test]
    async fn test_replies_stay_in_their_channel() {
        let gateway = FixedGateway::new(Ok("ok".to_string()));
        let use_case = use_case(gateway.clone());
        let mut ws = workspace();

        use_case.execute(&mut ws, "in welcome").await.unwrap();
        ws.select_channel("channel-2").unwrap();
        use_case.execute(&mut ws, "in general").await.unwrap();

        assert_eq!(ws.messages("channel-1").len(), 3);
        assert_eq!(ws.messages("channel-2").len(), 2);
        // one session per channel; the second one starts with no history
        let seeds = gateway.seeds.lock().unwrap();
        assert_eq!(seeds.len(), 2);
        assert!(seeds[1].is_empty());
    }

    #[tokio::test]
    async fn test_progress_brackets_call() {
        let gateway = FixedGateway::new(Ok("ok".to_string()));
        let progress = Arc::new(RecordingProgress::default());
        let mut ws = workspace();
        let channel_id = ws.active_channel_id().unwrap().to_string();

        use_case(gateway)
            .with_progress(progress.clone())
            .execute(&mut ws, "hello")
            .await
            .unwrap();

        assert_eq!(
            *progress.calls.lock().unwrap(),
            vec![
                format!("start {}", channel_id),
                format!("end {} true", channel_id)
            ]
        );
    }
}
