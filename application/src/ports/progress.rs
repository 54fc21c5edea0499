//! Reply progress port
//!
//! Lets the presentation layer show that the bot is working on a reply
//! ("Gemini is typing...") while an AI call is pending.

/// Callback around a pending bot reply
///
/// Implementations live in the presentation layer.
pub trait ReplyProgressNotifier: Send + Sync {
    /// Called right before the AI call for `channel_id` starts
    fn on_reply_start(&self, channel_id: &str);

    /// Called when the AI call finished, successfully or not
    fn on_reply_end(&self, channel_id: &str, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoReplyProgress;

impl ReplyProgressNotifier for NoReplyProgress {
    fn on_reply_start(&self, _channel_id: &str) {}
    fn on_reply_end(&self, _channel_id: &str, _success: bool) {}
}
