//! Generate Turn use case
//!
//! Produces one persona's contribution: builds the request context from the
//! transcript snapshot, streams the model's answer chunk by chunk, rejects
//! degenerate output and retries within the [`RetryPolicy`]. When every
//! attempt fails the persona's fallback message is returned instead, so a
//! turn always settles.

use crate::config::RetryPolicy;
use crate::ports::clock::{Sleeper, TokioSleeper};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::DebateProgressNotifier;
use debate_domain::{DebatePromptTemplate, Model, Persona, StreamEvent, TurnMessage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single attempt failed
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Degenerate output ({chars} chars after trimming)")]
    Degenerate { chars: usize },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl TurnError {
    pub fn is_degenerate(&self) -> bool {
        matches!(self, TurnError::Degenerate { .. })
    }
}

/// Everything a turn needs, as a value copy of the debate state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub chat_history: Vec<TurnMessage>,
    pub current_model: Model,
    #[serde(rename = "personaDescription")]
    pub persona: Persona,
    pub topic: String,
}

impl TurnRequest {
    pub fn new(
        topic: impl Into<String>,
        persona: Persona,
        current_model: Model,
        chat_history: Vec<TurnMessage>,
    ) -> Self {
        Self {
            chat_history,
            current_model,
            persona,
            topic: topic.into(),
        }
    }
}

/// Use case for generating a single debate turn
pub struct GenerateTurnUseCase<G: LlmGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized + 'static> GenerateTurnUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            sleeper: Arc::new(TokioSleeper),
            policy: RetryPolicy::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the turn to a settled message: real content or the fallback.
    pub async fn execute(
        &self,
        request: &TurnRequest,
        progress: &dyn DebateProgressNotifier,
    ) -> TurnMessage {
        let persona = &request.persona;
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let error = match self.attempt(request, progress).await {
                Ok(content) => {
                    debug!(
                        "{} answered on attempt {} ({} chars)",
                        persona.name(),
                        attempt,
                        content.chars().count()
                    );
                    return TurnMessage::assistant(persona, content);
                }
                Err(e) => e,
            };

            warn!(
                "Turn for {} on {} failed (attempt {}/{}): {}",
                persona.name(),
                request.current_model,
                attempt,
                max_attempts,
                error
            );
            self.logger.log(ConversationEvent::new(
                "turn_retry",
                serde_json::json!({
                    "persona": persona.name(),
                    "model": request.current_model.to_string(),
                    "attempt": attempt,
                    "degenerate": error.is_degenerate(),
                    "error": error.to_string(),
                }),
            ));

            if attempt < max_attempts {
                progress.on_turn_retry(persona, attempt, &error.to_string());
                let backoff = if error.is_degenerate() {
                    self.policy.degenerate_backoff
                } else {
                    self.policy.error_backoff
                };
                self.sleeper.sleep(backoff).await;
            }
        }

        info!(
            "{} could not respond after {} attempts, using fallback",
            persona.name(),
            max_attempts
        );
        TurnMessage::fallback(persona)
    }

    /// One attempt: stream the answer and validate it.
    ///
    /// Chunks are forwarded to `progress` as they arrive. The accumulated text
    /// is returned trimmed.
    pub async fn attempt(
        &self,
        request: &TurnRequest,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<String, TurnError> {
        let persona = &request.persona;
        let history =
            DebatePromptTemplate::turn_history(persona, &request.topic, &request.chat_history);
        let session = self
            .gateway
            .create_session_with_history(&request.current_model, history)
            .await?;

        let mut handle = session
            .send_streaming(&DebatePromptTemplate::turn_invitation(persona.name()))
            .await?;

        let mut full_content = String::new();
        while let Some(event) = handle.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    progress.on_turn_chunk(persona, &chunk);
                    full_content.push_str(&chunk);
                }
                StreamEvent::Completed(text) => {
                    if full_content.is_empty() && !text.is_empty() {
                        progress.on_turn_chunk(persona, &text);
                        full_content = text;
                    }
                    break;
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e).into());
                }
            }
        }

        let trimmed = full_content.trim();
        let chars = trimmed.chars().count();
        if chars < self.policy.min_content_chars {
            return Err(TurnError::Degenerate { chars });
        }
        Ok(trimmed.to_string())
    }
}
