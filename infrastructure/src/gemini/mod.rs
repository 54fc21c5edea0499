//! Gemini adapter
//!
//! Implements [`LlmGateway`](gemchat_application::LlmGateway) on top of the
//! Gemini `generateContent` REST endpoint.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
pub mod settings;
