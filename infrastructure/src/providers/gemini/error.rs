//! Error types for the Gemini adapter

use debate_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response was blocked: {0}")]
    Blocked(String),

    #[error("No response within {0}s")]
    Timeout(u64),

    #[error("No API key configured (set GEMINI_API_KEY or [provider].api_key)")]
    MissingApiKey,
}

impl From<GeminiError> for GatewayError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Timeout(_) => GatewayError::Timeout,
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Api { status: 404, message } => GatewayError::ModelNotAvailable(message),
            GeminiError::MissingApiKey => GatewayError::MissingApiKey,
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}
