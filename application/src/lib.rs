//! Application layer for gemchat
//!
//! This crate contains use cases, port definitions, the per-channel bot
//! session cache, and bot configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_cache;
pub mod use_cases;

// Re-export commonly used types
pub use config::BotConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoReplyProgress, ReplyProgressNotifier},
};
pub use session_cache::{SessionCache, SessionHandle};
pub use use_cases::post_message::{PostMessageError, PostMessageUseCase, PostOutcome};
pub use use_cases::send_message::{SendMessageError, SendMessageInput, SendMessageUseCase};
