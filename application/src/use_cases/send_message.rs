//! Send Message use case.
//!
//! Forwards one user message to the channel's bot session and returns the
//! reply. Any failure drops the channel's session so the next message starts
//! a fresh conversation, reseeded from the channel history.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, EVENT_BOT_FAILURE, EVENT_BOT_REPLY,
    EVENT_SESSION_EVICTED, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::session_cache::SessionCache;
use gemchat_domain::ChatTurn;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// The only error a caller ever sees from the bot.
#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error("Failed to get a response from the AI.")]
    AiCallFailed {
        #[source]
        source: GatewayError,
    },
}

/// Input for the [`SendMessageUseCase`].
#[derive(Debug, Clone)]
pub struct SendMessageInput {
    pub channel_id: String,
    pub text: String,
    /// Channel history before `text`; only used when a session is created.
    pub prior_history: Vec<ChatTurn>,
}

impl SendMessageInput {
    pub fn new(
        channel_id: impl Into<String>,
        text: impl Into<String>,
        prior_history: Vec<ChatTurn>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            text: text.into(),
            prior_history,
        }
    }
}

/// Dispatches user messages to per-channel bot sessions.
pub struct SendMessageUseCase {
    sessions: Arc<SessionCache>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for SendMessageUseCase {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self::with_cache(Arc::new(SessionCache::new(gateway)))
    }

    pub fn with_cache(sessions: Arc<SessionCache>) -> Self {
        Self {
            sessions,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn sessions(&self) -> &Arc<SessionCache> {
        &self.sessions
    }

    pub async fn execute(&self, input: SendMessageInput) -> Result<String, SendMessageError> {
        let SendMessageInput {
            channel_id,
            text,
            prior_history,
        } = input;

        let session = match self
            .sessions
            .get_or_create(&channel_id, &prior_history)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!(channel = %channel_id, error = %e, "Could not open bot session");
                self.log_failure(&channel_id, &e);
                return Err(SendMessageError::AiCallFailed { source: e });
            }
        };

        debug!(channel = %channel_id, session = session.id(), "Sending message to bot");
        match session.send(&text).await {
            Ok(reply) => {
                self.conversation_logger.log(ConversationEvent::new(
                    EVENT_BOT_REPLY,
                    serde_json::json!({
                        "channel_id": channel_id,
                        "session_id": session.id(),
                        "model": session.model(),
                        "prompt_bytes": text.len(),
                        "reply": reply,
                    }),
                ));
                Ok(reply)
            }
            Err(e) => {
                warn!(channel = %channel_id, session = session.id(), error = %e, "Bot call failed");
                self.log_failure(&channel_id, &e);
                if self.sessions.evict_if_same(&channel_id, &session).await {
                    self.conversation_logger.log(ConversationEvent::new(
                        EVENT_SESSION_EVICTED,
                        serde_json::json!({
                            "channel_id": channel_id,
                            "session_id": session.id(),
                        }),
                    ));
                }
                Err(SendMessageError::AiCallFailed { source: e })
            }
        }
    }

    fn log_failure(&self, channel_id: &str, error: &GatewayError) {
        self.conversation_logger.log(ConversationEvent::new(
            EVENT_BOT_FAILURE,
            serde_json::json!({
                "channel_id": channel_id,
                "error": error.to_string(),
            }),
        ));
    }
}
