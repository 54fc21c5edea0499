//! Gemini chat session.
//!
//! Provides [`GeminiSession`], which keeps the conversation history of one
//! channel and replays it on every `generateContent` call.

use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::gemini::settings::GeminiSettings;
use async_trait::async_trait;
use gemchat_application::ports::llm_gateway::{GatewayError, LlmSession};
use gemchat_domain::{ChatTurn, TurnRole};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// One channel's conversation with Gemini.
///
/// Turns are appended only after a successful reply, so a failed call leaves
/// the history exactly as it was.
pub struct GeminiSession {
    client: reqwest::Client,
    settings: Arc<GeminiSettings>,
    session_id: String,
    system_instruction: Option<Content>,
    generation_config: Option<GenerationConfig>,
    history: Mutex<Vec<Content>>,
}

impl GeminiSession {
    pub fn new(
        client: reqwest::Client,
        settings: Arc<GeminiSettings>,
        session_id: impl Into<String>,
        seed: &[ChatTurn],
    ) -> Self {
        let system_instruction = settings
            .system_instruction
            .as_deref()
            .map(Content::instruction);
        let generation_config =
            GenerationConfig::from_options(settings.temperature, settings.max_output_tokens);

        Self {
            client,
            settings,
            session_id: session_id.into(),
            system_instruction,
            generation_config,
            history: Mutex::new(seed_history(seed)),
        }
    }

    /// Number of contents replayed with the next request.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    async fn generate(&self, contents: &[Content]) -> Result<String> {
        let request = GenerateContentRequest {
            contents,
            system_instruction: self.system_instruction.as_ref(),
            generation_config: self.generation_config.as_ref(),
        };

        let response = self
            .client
            .post(self.settings.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        let body: GenerateContentResponse = match serde_json::from_str(&raw) {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                return Err(GeminiError::ParseError {
                    error: e.to_string(),
                    raw,
                });
            }
            Err(_) => {
                return Err(GeminiError::Api {
                    status: status.as_u16(),
                    message: raw,
                });
            }
        };

        if let Some(error) = body.error {
            return Err(GeminiError::Api {
                status: error.code.unwrap_or(status.as_u16()),
                message: error.message,
            });
        }
        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: raw,
            });
        }

        body.text().ok_or(GeminiError::EmptyResponse)
    }
}

/// Gemini contents for a seed history.
///
/// A conversation has to open with a user turn, so leading assistant turns
/// (such as a channel's welcome message) are skipped.
fn seed_history(seed: &[ChatTurn]) -> Vec<Content> {
    seed.iter()
        .skip_while(|turn| turn.role == TurnRole::Assistant)
        .map(Content::from)
        .collect()
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn id(&self) -> &str {
        &self.session_id
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        let mut history = self.history.lock().await;
        let mut contents = history.clone();
        contents.push(Content::user(content));

        debug!(
            "Sending to session {} ({} contents)",
            self.session_id,
            contents.len()
        );
        let reply = self.generate(&contents).await?;
        debug!(
            "Session {} received {} bytes",
            self.session_id,
            reply.len()
        );

        contents.push(Content::model(reply.clone()));
        *history = contents;
        Ok(reply)
    }
}
