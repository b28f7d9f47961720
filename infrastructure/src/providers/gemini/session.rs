//! Gemini LLM session implementation
//!
//! The REST API is stateless: every request carries the session's history
//! followed by the new user message.

use super::error::{GeminiError, Result};
use super::gateway::GeminiClient;
use super::types::{self, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use debate_application::ports::llm_gateway::{GatewayError, LlmSession, StreamHandle};
use debate_domain::{Message, Model, StreamEvent};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct GeminiSession {
    client: Arc<GeminiClient>,
    model: Model,
    history: Vec<Message>,
}

impl GeminiSession {
    pub(crate) fn new(client: Arc<GeminiClient>, model: Model, history: Vec<Message>) -> Self {
        Self {
            client,
            model,
            history,
        }
    }

    async fn post(&self, url: &str, content: &str) -> Result<reqwest::Response> {
        let body = GenerateContentRequest::from_messages(&self.history, content);
        debug!(
            model = %self.model,
            messages = body.contents.len(),
            "Sending Gemini request"
        );
        let response = self
            .client
            .http
            .post(url)
            .header("x-goog-api-key", &self.client.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: types::error_message(&body),
            });
        }
        Ok(response)
    }

    async fn generate(&self, content: &str) -> Result<String> {
        let url = self.client.endpoint(&self.model, "generateContent");
        let response = tokio::time::timeout(self.client.config.request_timeout, async {
            let response = self.post(&url, content).await?;
            let body = response.text().await?;
            Ok::<_, GeminiError>(serde_json::from_str::<GenerateContentResponse>(&body)?)
        })
        .await
        .map_err(|_| GeminiError::Timeout(self.client.config.request_timeout.as_secs()))??;
        response.text()
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.generate(content).await?)
    }

    async fn send_streaming(&self, content: &str) -> std::result::Result<StreamHandle, GatewayError> {
        let url = format!(
            "{}?alt=sse",
            self.client.endpoint(&self.model, "streamGenerateContent")
        );
        // Bounds both the wait for response headers and each gap between chunks
        let idle = self.client.config.request_timeout;
        let response = tokio::time::timeout(idle, self.post(&url, content))
            .await
            .map_err(|_| GeminiError::Timeout(idle.as_secs()))??;
        let (tx, rx) = mpsc::channel(32);
        let model = self.model.clone();

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();
            let mut full_text = String::new();

            loop {
                let chunk = match tokio::time::timeout(idle, stream.next()).await {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => break,
                    Err(_) => {
                        warn!(model = %model, "Gemini stream stalled for {:?}", idle);
                        let error = GeminiError::Timeout(idle.as_secs());
                        let _ = tx.send(StreamEvent::Error(error.to_string())).await;
                        return;
                    }
                };
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(model = %model, "Gemini stream interrupted: {}", e);
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                buffer.extend_from_slice(&bytes);

                // Split on complete lines only, so multi-byte characters never straddle a decode
                while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line);
                    if !forward_line(line.trim_end(), &tx, &mut full_text).await {
                        return;
                    }
                }
            }

            if !buffer.is_empty() {
                let line = String::from_utf8_lossy(&buffer).into_owned();
                if !forward_line(line.trim_end(), &tx, &mut full_text).await {
                    return;
                }
            }
            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Forward one SSE line. Returns false when the stream should end.
async fn forward_line(line: &str, tx: &mpsc::Sender<StreamEvent>, full_text: &mut String) -> bool {
    match types::parse_sse_line(line) {
        None => true,
        Some(Ok(text)) if text.is_empty() => true,
        Some(Ok(text)) => {
            full_text.push_str(&text);
            // receiver dropped
            tx.send(StreamEvent::Delta(text)).await.is_ok()
        }
        Some(Err(e)) => {
            let _ = tx.send(StreamEvent::Error(e.to_string())).await;
            false
        }
    }
}
