//! Adjudicate use case
//!
//! Produces the single verdict that closes a debate. The judge chain is
//! sequential: primary model, then fallback model with the identical prompt,
//! then a static message. It never fails observably.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use debate_domain::{DebatePromptTemplate, Model, TurnMessage, Verdict, VerdictSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_JUDGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Transcript snapshot and topic for the judge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictRequest {
    pub chat_history: Vec<TurnMessage>,
    pub topic: String,
}

impl VerdictRequest {
    pub fn new(topic: impl Into<String>, chat_history: Vec<TurnMessage>) -> Self {
        Self {
            chat_history,
            topic: topic.into(),
        }
    }

    /// The judge prompt, or `None` when no expert has spoken
    pub fn prompt(&self) -> Option<String> {
        DebatePromptTemplate::expert_opinions(&self.chat_history)
            .map(|opinions| DebatePromptTemplate::judge_prompt(&self.topic, &opinions))
    }
}

/// Use case for adjudicating a debate
pub struct AdjudicateUseCase<G: LlmGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    judge: Model,
    fallback: Model,
    timeout: Duration,
}

impl<G: LlmGateway + ?Sized + 'static> AdjudicateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            judge: Model::default_judge(),
            fallback: Model::default_judge_fallback(),
            timeout: DEFAULT_JUDGE_TIMEOUT,
        }
    }

    pub fn with_models(mut self, judge: Model, fallback: Model) -> Self {
        self.judge = judge;
        self.fallback = fallback;
        self
    }

    /// Bound on each link of the chain
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn judge(&self) -> &Model {
        &self.judge
    }

    pub async fn execute(&self, request: &VerdictRequest) -> Verdict {
        let Some(prompt) = request.prompt() else {
            info!("No expert opinions yet, skipping the judge");
            return Verdict::no_opinions();
        };

        match self.ask(&self.judge, &prompt).await {
            Ok(text) => return Verdict::ruling(text, VerdictSource::Primary(self.judge.clone())),
            Err(e) => warn!("Primary judge {} failed: {}", self.judge, e),
        }

        match self.ask(&self.fallback, &prompt).await {
            Ok(text) => Verdict::ruling(text, VerdictSource::Fallback(self.fallback.clone())),
            Err(e) => {
                warn!("Fallback judge {} failed: {}", self.fallback, e);
                Verdict::unavailable()
            }
        }
    }

    async fn ask(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        info!("Asking {} for a verdict", model);
        let call = async {
            let session = self.gateway.create_session(model).await?;
            session.send(prompt).await
        };
        let text = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout)??;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::RequestFailed("empty verdict".to_string()));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Reply, ScriptedGateway};
    use debate_domain::{NO_OPINIONS_VERDICT, Persona, UNAVAILABLE_VERDICT};

    fn transcript() -> Vec<TurnMessage> {
        let physicist = Persona::new("fizik", "Fizik", "fizik");
        let economist = Persona::new("ekonomi", "Ekonomi", "ekonomi");
        vec![
            TurnMessage::seed("Is AI dangerous?"),
            TurnMessage::assistant(&physicist, "Compute is bounded by energy."),
            TurnMessage::assistant(&economist, "Markets will price the risk."),
        ]
    }

    #[tokio::test]
    async fn test_primary_verdict() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::text(
            "  Fizik argümanları daha güçlü. SONUÇ: Hayır  ",
        )]));
        let judge = AdjudicateUseCase::new(Arc::clone(&gateway));

        let verdict = judge.execute(&VerdictRequest::new("Is AI dangerous?", transcript())).await;

        assert_eq!(verdict.content(), "Fizik argümanları daha güçlü. SONUÇ: Hayır");
        assert_eq!(verdict.source(), &VerdictSource::Primary(Model::Gemini25Pro));
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("Fizik Uzmanı:\nCompute is bounded by energy."));
        assert!(calls[0].prompt.contains("\n\n---\n\n"));
    }

    #[tokio::test]
    async fn test_hanging_primary_times_out_to_fallback() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Reply::Hang,
            Reply::text("Fizik kazandı. SONUÇ: Hayır"),
        ]));
        let judge = AdjudicateUseCase::new(Arc::clone(&gateway))
            .with_timeout(Duration::from_millis(20));

        let verdict = judge.execute(&VerdictRequest::new("Is AI dangerous?", transcript())).await;

        assert_eq!(verdict.content(), "Fizik kazandı. SONUÇ: Hayır");
        assert_eq!(verdict.source(), &VerdictSource::Fallback(Model::default_judge_fallback()));
        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].prompt, calls[1].prompt);
    }

    #[tokio::test]
    async fn test_both_judges_hanging_yield_unavailable() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::Hang, Reply::Hang]));
        let judge = AdjudicateUseCase::new(gateway).with_timeout(Duration::from_millis(20));

        let verdict = judge.execute(&VerdictRequest::new("Is AI dangerous?", transcript())).await;

        assert_eq!(verdict.source(), &VerdictSource::Unavailable);
    }

    #[tokio::test]
    async fn test_empty_primary_falls_back_with_same_prompt() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Reply::text("   "),
            Reply::text("Ekonomi argümanları daha güçlü. SONUÇ: Belirsiz"),
        ]));
        let judge = AdjudicateUseCase::new(Arc::clone(&gateway));

        let verdict = judge.execute(&VerdictRequest::new("Is AI dangerous?", transcript())).await;

        assert_eq!(verdict.source(), &VerdictSource::Fallback(Model::Gemini25Flash));
        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].model, Model::Gemini25Pro);
        assert_eq!(calls[1].model, Model::Gemini25Flash);
        assert_eq!(calls[0].prompt, calls[1].prompt);
    }

    #[tokio::test]
    async fn test_both_judges_fail() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Reply::fail("quota"),
            Reply::fail("quota"),
        ]));
        let judge = AdjudicateUseCase::new(gateway);

        let verdict = judge.execute(&VerdictRequest::new("Is AI dangerous?", transcript())).await;

        assert_eq!(verdict.content(), UNAVAILABLE_VERDICT);
        assert_eq!(verdict.source(), &VerdictSource::Unavailable);
    }

    #[tokio::test]
    async fn test_no_opinions_skips_models() {
        let gateway = Arc::new(ScriptedGateway::answering("unused verdict"));
        let judge = AdjudicateUseCase::new(Arc::clone(&gateway));

        let request = VerdictRequest::new("Is AI dangerous?", vec![TurnMessage::seed("Is AI dangerous?")]);
        let verdict = judge.execute(&request).await;

        assert_eq!(verdict.content(), NO_OPINIONS_VERDICT);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_identical_input_gives_identical_prompt() {
        let gateway = Arc::new(ScriptedGateway::answering("Fizik kazandı. SONUÇ: Hayır"));
        let judge = AdjudicateUseCase::new(Arc::clone(&gateway));
        let request = VerdictRequest::new("Is AI dangerous?", transcript());

        let first = judge.execute(&request).await;
        let second = judge.execute(&request).await;

        assert_eq!(first, second);
        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].prompt, calls[1].prompt);
    }
}
