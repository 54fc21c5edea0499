//! LLM Gateway port
//!
//! Defines the interface for communicating with the conversational-AI
//! provider that writes the bot's replies.

use async_trait::async_trait;
use gemchat_domain::ChatTurn;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer opens conversations with the
/// provider. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a conversation for `channel_id`, seeded with earlier turns.
    async fn create_session(
        &self,
        channel_id: &str,
        seed: &[ChatTurn],
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An open conversation with the provider.
///
/// The session owns whatever context the provider needs to keep replies
/// coherent across turns; callers only send text.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Identifier for logs
    fn id(&self) -> &str;

    /// Model answering in this session
    fn model(&self) -> &str;

    /// Send a message and get the reply text
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}
