//! Error types for the Gemini adapter

use gemchat_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("No text in Gemini response")]
    EmptyResponse,

    #[error("Gemini API key not found. Set `gemini.api_key` in the config or export {0}")]
    MissingApiKey(String),
}

impl From<GeminiError> for GatewayError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::Http(err) if err.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(err) if err.is_connect() => {
                GatewayError::ConnectionError(err.to_string())
            }
            GeminiError::Http(err) => GatewayError::RequestFailed(err.to_string()),
            e @ GeminiError::Api { .. } => GatewayError::RequestFailed(e.to_string()),
            e @ (GeminiError::ParseError { .. } | GeminiError::EmptyResponse) => {
                GatewayError::MalformedResponse(e.to_string())
            }
            e @ GeminiError::MissingApiKey(_) => GatewayError::SessionError(e.to_string()),
        }
    }
}
