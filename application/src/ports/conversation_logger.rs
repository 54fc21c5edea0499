//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording bot traffic
//! (replies, failures, session evictions) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the bot
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// Event type of a successful bot reply.
pub const EVENT_BOT_REPLY: &str = "bot_reply";
/// Event type of a failed AI call.
pub const EVENT_BOT_FAILURE: &str = "bot_failure";
/// Event type of a session dropped after a failure.
pub const EVENT_SESSION_EVICTED: &str = "session_evicted";

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The writer adds the timestamp.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "bot_reply", "bot_failure").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and infallible; write failures are dropped.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
