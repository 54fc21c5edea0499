//! "Gemini is typing..." indicator

use gemchat_application::ports::progress::ReplyProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while the bot's reply is pending
pub struct TypingIndicator {
    bot_name: String,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TypingIndicator {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            spinner: Mutex::new(None),
        }
    }

    pub fn message(&self) -> String {
        format!("{} is typing...", self.bot_name)
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.magenta} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn is_active(&self) -> bool {
        self.spinner
            .lock()
            .map(|s| s.is_some())
            .unwrap_or(false)
    }
}

impl ReplyProgressNotifier for TypingIndicator {
    fn on_reply_start(&self, _channel_id: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message(self.message());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(previous) = spinner.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_reply_end(&self, _channel_id: &str, _success: bool) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}
