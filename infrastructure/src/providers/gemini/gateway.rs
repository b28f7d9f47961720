//! Gemini implementation of the LlmGateway port

use super::error::{GeminiError, Result};
use super::session::GeminiSession;
use async_trait::async_trait;
use debate_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use debate_domain::{Message, Model};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Applies to one-shot requests and to connecting; streams are unbounded
    pub request_timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Shared HTTP client and settings, one per gateway
pub(crate) struct GeminiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: GeminiConfig,
}

impl GeminiClient {
    pub(crate) fn endpoint(&self, model: &Model, method: &str) -> String {
        format!("{}/models/{}:{}", self.config.base_url, model, method)
    }
}

/// LLM gateway backed by the Gemini REST API
pub struct GeminiLlmGateway {
    client: Arc<GeminiClient>,
}

impl GeminiLlmGateway {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client: Arc::new(GeminiClient { http, config }),
        })
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    async fn create_session_with_history(
        &self,
        model: &Model,
        history: Vec<Message>,
    ) -> std::result::Result<Box<dyn LlmSession>, GatewayError> {
        debug!(model = %model, history = history.len(), "Creating Gemini session");
        Ok(Box::new(GeminiSession::new(
            Arc::clone(&self.client),
            model.clone(),
            history,
        )))
    }
}
