//! Gemini LLM Gateway implementation

use crate::gemini::error::Result;
use crate::gemini::session::GeminiSession;
use crate::gemini::settings::GeminiSettings;
use async_trait::async_trait;
use gemchat_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use gemchat_domain::ChatTurn;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// LLM Gateway implementation for the Gemini REST API
///
/// Sessions share one HTTP client; each keeps its own history.
pub struct GeminiGateway {
    client: reqwest::Client,
    settings: Arc<GeminiSettings>,
    next_session: AtomicU64,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        info!(
            "GeminiGateway initialized (model: {}, endpoint: {})",
            settings.model,
            settings.endpoint()
        );

        Ok(Self {
            client,
            settings: Arc::new(settings),
            next_session: AtomicU64::new(1),
        })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session(
        &self,
        channel_id: &str,
        seed: &[ChatTurn],
    ) -> std::result::Result<Box<dyn LlmSession>, GatewayError> {
        let n = self.next_session.fetch_add(1, Ordering::Relaxed);
        let session = GeminiSession::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            format!("{}-{}", channel_id, n),
            seed,
        );
        Ok(Box::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        }))
    }

    fn gateway(server: &MockServer) -> GeminiGateway {
        let settings = GeminiSettings::new("test-key", "gemini-2.5-flash")
            .with_base_url(server.uri())
            .with_system_instruction("Be brief.");
        GeminiGateway::new(settings).unwrap()
    }

    async fn request_bodies(server: &MockServer) -> Vec<serde_json::Value> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_send_returns_reply_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(reply("Hello from Gemini"))
            .expect(1)
            .mount(&server)
            .await;

        let session = gateway(&server)
            .create_session("channel-1", &[])
            .await
            .unwrap();
        let text = session.send("hi").await.unwrap();

        assert_eq!(text, "Hello from Gemini");
        assert_eq!(session.model(), "gemini-2.5-flash");
        assert!(session.id().starts_with("channel-1-"));
    }

    #[tokio::test]
    async fn test_request_carries_instruction_and_seed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(body_partial_json(json!({
                "systemInstruction": {"parts": [{"text": "Be brief."}]}
            })))
            .respond_with(reply("ok"))
            .mount(&server)
            .await;

        let seed = vec![
            ChatTurn::assistant("Welcome!"),
            ChatTurn::human("earlier"),
            ChatTurn::assistant("noted"),
        ];
        let session = gateway(&server)
            .create_session("channel-1", &seed)
            .await
            .unwrap();
        session.send("now").await.unwrap();

        let bodies = request_bodies(&server).await;
        assert_eq!(
            bodies[0]["contents"],
            json!([
                {"role": "user", "parts": [{"text": "earlier"}]},
                {"role": "model", "parts": [{"text": "noted"}]},
                {"role": "user", "parts": [{"text": "now"}]}
            ])
        );
    }

    #[tokio::test]
    async fn test_history_grows_with_each_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(reply("answer"))
            .mount(&server)
            .await;

        let session = gateway(&server)
            .create_session("channel-1", &[])
            .await
            .unwrap();
        session.send("first").await.unwrap();
        session.send("second").await.unwrap();

        let bodies = request_bodies(&server).await;
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[1]["contents"].as_array().unwrap().len(), 3);
        assert_eq!(bodies[1]["contents"][1]["parts"][0]["text"], "answer");
    }

    #[tokio::test]
    async fn test_failed_call_leaves_history_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let session = GeminiSession::new(
            reqwest::Client::new(),
            Arc::new(GeminiSettings::new("bad-key", "gemini-2.5-flash").with_base_url(server.uri())),
            "channel-1-1",
            &[ChatTurn::human("hi"), ChatTurn::assistant("hello")],
        );
        let err = session.send("again").await.unwrap_err();

        assert_eq!(
            err,
            GatewayError::RequestFailed("Gemini API error (400): API key not valid".to_string())
        );
        assert_eq!(session.history_len().await, 2);
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let session = gateway(&server)
            .create_session("channel-1", &[])
            .await
            .unwrap();
        let err = session.send("hi").await.unwrap_err();

        assert_eq!(
            err,
            GatewayError::RequestFailed(
                "Gemini API error (503): upstream unavailable".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_missing_text_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"finishReason": "SAFETY"}]
            })))
            .mount(&server)
            .await;

        let session = gateway(&server)
            .create_session("channel-1", &[])
            .await
            .unwrap();

        assert!(matches!(
            session.send("hi").await,
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_session_ids_are_unique() {
        let server = MockServer::start().await;
        let gateway = gateway(&server);

        let a = gateway.create_session("channel-1", &[]).await.unwrap();
        let b = gateway.create_session("channel-1", &[]).await.unwrap();

        assert_ne!(a.id(), b.id());
    }
}
