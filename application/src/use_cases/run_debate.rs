//! Run Debate use case
//!
//! Drives a debate from start to verdict: binds the shuffled model pool to
//! the four slots, runs the round-robin turns strictly one at a time, and
//! hands the transcript to the judge once the turn budget is spent or a stop
//! is requested.
//!
//! A stop is cooperative. It is observed between turns and while a turn is in
//! flight; an in-flight turn is abandoned and its result, if any, discarded.

use crate::config::{DebateParams, ModelSettings};
use crate::ports::clock::{Sleeper, TokioSleeper};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::DebateProgressNotifier;
use crate::use_cases::adjudicate::{AdjudicateUseCase, VerdictRequest};
use crate::use_cases::generate_turn::{GenerateTurnUseCase, TurnRequest};
use debate_domain::{
    DebateConfiguration, DebatePhase, DebateSession, DomainError, ModelPool, PersonaRegistry,
    TurnMessage, Verdict, preview,
};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur when running a debate
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate: {0}")]
    Domain(#[from] DomainError),
}

impl RunDebateError {
    /// True when the caller has to fix its input
    pub fn is_configuration_error(&self) -> bool {
        match self {
            RunDebateError::Domain(e) => e.is_configuration_error(),
        }
    }
}

/// A concluded debate
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    pub session: DebateSession,
    pub verdict: Verdict,
    /// True when a stop ended the debate before the turn budget
    pub stopped_early: bool,
}

/// Use case for running a full debate
pub struct RunDebateUseCase<G: LlmGateway + ?Sized + 'static> {
    turns: GenerateTurnUseCase<G>,
    judge: AdjudicateUseCase<G>,
    pool: ModelPool,
    params: DebateParams,
    sleeper: Arc<dyn Sleeper>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let params = DebateParams::default();
        Self {
            turns: GenerateTurnUseCase::new(Arc::clone(&gateway)).with_policy(params.retry.clone()),
            judge: AdjudicateUseCase::new(gateway).with_timeout(params.judge_timeout),
            pool: ModelPool::default(),
            params,
            sleeper: Arc::new(TokioSleeper),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_models(mut self, models: ModelSettings) -> Self {
        self.judge = self.judge.with_models(models.judge, models.judge_fallback);
        self.pool = models.pool;
        self
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.turns = self.turns.with_policy(params.retry.clone());
        self.judge = self.judge.with_timeout(params.judge_timeout);
        self.params = params;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.turns = self.turns.with_sleeper(Arc::clone(&sleeper));
        self.sleeper = sleeper;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.turns = self.turns.with_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    /// `Idle → Running`: shuffle the pool onto the slots and seed the transcript.
    ///
    /// Configuration errors surface here, before any model is called.
    pub fn prepare<R: Rng + ?Sized>(
        &self,
        configuration: DebateConfiguration,
        registry: &PersonaRegistry,
        rng: &mut R,
    ) -> Result<DebateSession, RunDebateError> {
        let assignment = self.pool.assign(rng);
        Ok(DebateSession::new().start(configuration, registry, assignment)?)
    }

    /// Prepare with a fresh random assignment, then run to a verdict
    pub async fn execute(
        &self,
        configuration: DebateConfiguration,
        registry: &PersonaRegistry,
        cancel: &CancellationToken,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateOutcome, RunDebateError> {
        let session = {
            let mut rng = rand::thread_rng();
            self.prepare(configuration, registry, &mut rng)?
        };
        self.run(session, cancel, progress).await
    }

    /// Drive a running session through its turns and adjudication
    pub async fn run(
        &self,
        mut session: DebateSession,
        cancel: &CancellationToken,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateOutcome, RunDebateError> {
        let topic = session.topic().unwrap_or_default().to_string();
        let models = session
            .assignment()
            .map(|a| a.models().to_vec())
            .unwrap_or_default();

        info!(
            "Starting debate on \"{}\" with {} turns",
            topic,
            session.turn_budget()
        );
        progress.on_debate_start(&topic, session.personas(), &models, session.turn_budget());
        self.logger.log(ConversationEvent::new(
            "debate_started",
            serde_json::json!({
                "topic": topic,
                "personas": session.personas().iter().map(|p| p.name()).collect::<Vec<_>>(),
                "models": models.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
                "turn_budget": session.turn_budget(),
            }),
        ));
        for message in session.transcript().messages() {
            progress.on_message_appended(message);
        }

        let mut delay = self.params.first_turn_delay;
        while let Some(slot) = session.current_turn() {
            if !self.pause(delay, cancel).await {
                break;
            }
            delay = self.params.inter_turn_delay;

            let turn_index = slot.turn_index;
            let request = TurnRequest::new(
                topic.clone(),
                slot.persona.clone(),
                slot.model.clone(),
                session.transcript().snapshot(),
            );
            debug!(
                "Turn {}: {} on {}",
                turn_index + 1,
                request.persona.name(),
                request.current_model
            );
            progress.on_turn_start(turn_index, &request.persona, &request.current_model);

            let settled = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                message = self.turns.execute(&request, progress) => Some(message),
            };
            // A stop that arrived while the turn was settling supersedes it
            let Some(message) = settled.filter(|_| !cancel.is_cancelled()) else {
                info!("Stop requested, discarding turn {}", turn_index + 1);
                break;
            };

            session = session.record_turn(message)?;
            if let Some(committed) = session.transcript().last() {
                self.log_turn(turn_index, &request, committed);
                progress.on_message_appended(committed);
            }
        }

        let stopped_early = session.phase() == DebatePhase::Running;
        let session = session.stop()?.begin_adjudication()?;
        info!(
            "Debate {} after {} turns, adjudicating",
            if stopped_early { "stopped" } else { "exhausted" },
            session.turn_index()
        );

        progress.on_adjudication_start(self.judge.judge());
        let request = VerdictRequest::new(topic, session.transcript().snapshot());
        let verdict = self.judge.execute(&request).await;

        let session = session.conclude(verdict.content())?;
        if let Some(message) = session.transcript().verdict() {
            progress.on_message_appended(message);
        }
        progress.on_verdict(&verdict);
        self.logger.log(ConversationEvent::new(
            "verdict",
            serde_json::json!({
                "source": verdict.source(),
                "content": verdict.content(),
                "turns": session.turn_index(),
                "stopped_early": stopped_early,
            }),
        ));

        Ok(DebateOutcome {
            session,
            verdict,
            stopped_early,
        })
    }

    /// Wait out a pacing delay. Returns false if a stop arrived first.
    async fn pause(&self, delay: Duration, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        if delay.is_zero() {
            return true;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = self.sleeper.sleep(delay) => true,
        }
    }

    fn log_turn(&self, turn_index: usize, request: &TurnRequest, message: &TurnMessage) {
        debug!(
            "Turn {} committed: {}",
            turn_index + 1,
            preview(&message.content, 80)
        );
        self.logger.log(ConversationEvent::new(
            "turn_committed",
            serde_json::json!({
                "turn": turn_index + 1,
                "persona": request.persona.name(),
                "model": request.current_model.to_string(),
                "fallback": message.is_fallback(),
                "content": message.content,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::ports::progress::NoDebateProgress;
    use crate::use_cases::test_support::{RecordingProgress, RecordingSleeper, Reply, ScriptedGateway};
    use debate_domain::{
        Model, Persona, PersonaId, TurnRole, UNAVAILABLE_VERDICT, VerdictSource,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ANSWER: &str = "A sufficiently long expert answer.";

    fn registry() -> PersonaRegistry {
        PersonaRegistry::from_personas(vec![
            Persona::new("physicist", "Physicist", "physics"),
            Persona::new("philosopher", "Philosopher", "philosophy"),
            Persona::new("biologist", "Biologist", "biology"),
            Persona::new("economist", "Economist", "economics"),
        ])
    }

    fn configuration() -> DebateConfiguration {
        let ids = ["physicist", "philosopher", "biologist", "economist"]
            .into_iter()
            .map(PersonaId::new)
            .collect();
        DebateConfiguration::new("Is AI dangerous?", ids).unwrap()
    }

    fn use_case(gateway: Arc<ScriptedGateway>) -> RunDebateUseCase<ScriptedGateway> {
        RunDebateUseCase::new(gateway)
            .with_params(DebateParams::immediate())
            .with_sleeper(Arc::new(RecordingSleeper::default()))
    }

    fn prepared(debate: &RunDebateUseCase<ScriptedGateway>) -> DebateSession {
        let mut rng = StdRng::seed_from_u64(7);
        debate.prepare(configuration(), &registry(), &mut rng).unwrap()
    }

    #[tokio::test]
    async fn test_full_debate_scenario() {
        let gateway = Arc::new(ScriptedGateway::answering(ANSWER));
        let debate = use_case(Arc::clone(&gateway));
        let session = prepared(&debate);
        let assignment = session.assignment().unwrap().clone();
        let progress = RecordingProgress::default();

        let outcome = debate
            .run(session, &CancellationToken::new(), &progress)
            .await
            .unwrap();

        let messages = outcome.session.transcript().messages();
        // seed + 12 turns + verdict
        assert_eq!(messages.len(), 14);
        assert_eq!(messages[0].role, TurnRole::User);
        assert!(messages[0].content.contains("Is AI dangerous?"));
        assert_eq!(outcome.session.transcript().assistant_messages().count(), 12);
        for k in 1..=12 {
            let expected = ["Physicist", "Philosopher", "Biologist", "Economist"][(k - 1) % 4];
            assert_eq!(messages[k].persona_name.as_deref(), Some(expected));
        }
        for position in [1, 5, 9] {
            assert_eq!(messages[position].persona_name.as_deref(), Some("Physicist"));
        }
        assert_eq!(messages.iter().filter(|m| m.is_judge()).count(), 1);
        assert!(messages[13].is_judge());
        assert_eq!(outcome.session.phase(), DebatePhase::Concluded);
        assert!(!outcome.stopped_early);

        // the sink saw every message in order
        assert_eq!(*progress.appended.lock().unwrap(), messages.to_vec());

        // each turn ran on its slot's model; the judge came last
        let calls = gateway.calls();
        assert_eq!(calls.len(), 13);
        for (turn, call) in calls.iter().take(12).enumerate() {
            assert_eq!(&call.model, assignment.for_turn(turn));
        }
        assert_eq!(calls[12].model, Model::Gemini25Pro);
    }

    #[tokio::test]
    async fn test_turn_sees_prior_turns() {
        let gateway = Arc::new(ScriptedGateway::answering(ANSWER));
        let debate = use_case(Arc::clone(&gateway));

        debate
            .run(prepared(&debate), &CancellationToken::new(), &NoDebateProgress)
            .await
            .unwrap();

        let calls = gateway.calls();
        // instruction line plus one framing line per earlier turn
        for (turn, call) in calls.iter().take(12).enumerate() {
            assert_eq!(call.history.len(), 1 + turn);
        }
    }

    #[tokio::test]
    async fn test_pacing_delays() {
        let gateway = Arc::new(ScriptedGateway::answering(ANSWER));
        let sleeper = Arc::new(RecordingSleeper::default());
        let debate = RunDebateUseCase::new(gateway).with_sleeper(Arc::clone(&sleeper) as Arc<dyn Sleeper>);

        debate
            .run(prepared(&debate), &CancellationToken::new(), &NoDebateProgress)
            .await
            .unwrap();

        let slept = sleeper.slept();
        assert_eq!(slept.len(), 12);
        assert_eq!(slept[0], Duration::from_millis(1000));
        assert!(slept[1..].iter().all(|d| *d == Duration::from_millis(1500)));
    }

    #[tokio::test]
    async fn test_degenerate_turn_retried_in_place() {
        let mut replies: Vec<Reply> = vec![Reply::text(ANSWER), Reply::text(ANSWER)];
        replies.extend([Reply::text(""), Reply::text(""), Reply::text("Biology settles this one.")]);
        let gateway = Arc::new(ScriptedGateway::with_default(replies, ANSWER));
        let debate = use_case(Arc::clone(&gateway));

        let outcome = debate
            .run(prepared(&debate), &CancellationToken::new(), &NoDebateProgress)
            .await
            .unwrap();

        let messages = outcome.session.transcript().messages();
        assert_eq!(outcome.session.transcript().assistant_messages().count(), 12);
        assert_eq!(messages[3].content, "Biology settles this one.");
        assert_eq!(messages[3].persona_name.as_deref(), Some("Biologist"));
        assert_eq!(messages[4].persona_name.as_deref(), Some("Economist"));
        // 12 turns + 2 retries + judge
        assert_eq!(gateway.calls().len(), 15);
    }

    #[tokio::test]
    async fn test_failed_turn_becomes_fallback_and_debate_advances() {
        let replies = vec![Reply::fail("quota"), Reply::fail("quota"), Reply::fail("quota")];
        let gateway = Arc::new(ScriptedGateway::with_default(replies, ANSWER));
        let debate = use_case(gateway);

        let outcome = debate
            .run(prepared(&debate), &CancellationToken::new(), &NoDebateProgress)
            .await
            .unwrap();

        let messages = outcome.session.transcript().messages();
        assert!(messages[1].is_fallback());
        assert_eq!(messages[1].content, TurnMessage::fallback_text("Physicist"));
        assert_eq!(outcome.session.turn_index(), 12);
        assert_eq!(outcome.session.transcript().assistant_messages().count(), 12);
    }

    #[tokio::test]
    async fn test_both_judges_fail() {
        let mut replies: Vec<Reply> = (0..12).map(|_| Reply::text(ANSWER)).collect();
        replies.extend([Reply::fail("judge down"), Reply::text("  ")]);
        let gateway = Arc::new(ScriptedGateway::new(replies));
        let debate = use_case(gateway);
        let progress = RecordingProgress::default();

        let outcome = debate
            .run(prepared(&debate), &CancellationToken::new(), &progress)
            .await
            .unwrap();

        assert_eq!(outcome.verdict.content(), UNAVAILABLE_VERDICT);
        assert_eq!(outcome.session.verdict(), Some(UNAVAILABLE_VERDICT));
        let judges: Vec<_> = outcome
            .session
            .transcript()
            .messages()
            .iter()
            .filter(|m| m.is_judge())
            .collect();
        assert_eq!(judges.len(), 1);
        assert_eq!(judges[0].content, UNAVAILABLE_VERDICT);
        assert_eq!(*progress.verdicts.lock().unwrap(), vec![UNAVAILABLE_VERDICT.to_string()]);
    }

    #[tokio::test]
    async fn test_stop_abandons_in_flight_turn() {
        let token = CancellationToken::new();
        let replies = vec![
            Reply::text(ANSWER),
            Reply::text(ANSWER),
            Reply::CancelThenHang(token.clone()),
        ];
        let gateway = Arc::new(ScriptedGateway::with_default(
            replies,
            "Physicist wins. SONUÇ: Hayır",
        ));
        let debate = use_case(Arc::clone(&gateway));

        let outcome = debate
            .run(prepared(&debate), &token, &NoDebateProgress)
            .await
            .unwrap();

        assert!(outcome.stopped_early);
        assert_eq!(outcome.session.turn_index(), 2);
        let messages = outcome.session.transcript().messages();
        assert_eq!(messages.len(), 4);
        assert!(messages[3].is_judge());
        assert_eq!(outcome.verdict.content(), "Physicist wins. SONUÇ: Hayır");

        // Third turn was dispatched before the stop, then the judge ran
        let calls = gateway.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[3].prompt.contains("SONUÇ:"));
    }

    #[tokio::test]
    async fn test_result_resolved_after_stop_is_discarded() {
        let token = CancellationToken::new();
        let replies = vec![
            Reply::text(ANSWER),
            Reply::CancelThen(token.clone(), "A late answer nobody should see.".into()),
        ];
        let gateway = Arc::new(ScriptedGateway::with_default(replies, "Verdict text here."));
        let debate = use_case(gateway);

        let outcome = debate
            .run(prepared(&debate), &token, &NoDebateProgress)
            .await
            .unwrap();

        assert_eq!(outcome.session.turn_index(), 1);
        assert!(
            outcome
                .session
                .transcript()
                .messages()
                .iter()
                .all(|m| !m.content.contains("late answer"))
        );
    }

    #[tokio::test]
    async fn test_stop_before_first_turn_needs_no_model() {
        let gateway = Arc::new(ScriptedGateway::answering(ANSWER));
        let debate = use_case(Arc::clone(&gateway));
        let token = CancellationToken::new();
        token.cancel();

        let outcome = debate.run(prepared(&debate), &token, &NoDebateProgress).await.unwrap();

        assert_eq!(outcome.verdict.source(), &VerdictSource::NoOpinions);
        assert_eq!(outcome.session.transcript().len(), 2);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_configuration_error_before_any_call() {
        let gateway = Arc::new(ScriptedGateway::answering(ANSWER));
        let debate = use_case(Arc::clone(&gateway));
        let ids = ["physicist", "philosopher", "biologist", "astronomer"]
            .into_iter()
            .map(PersonaId::new)
            .collect();
        let configuration = DebateConfiguration::new("Is AI dangerous?", ids).unwrap();

        let err = debate
            .execute(configuration, &registry(), &CancellationToken::new(), &NoDebateProgress)
            .await
            .unwrap_err();

        assert!(err.is_configuration_error());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_custom_turn_budget() {
        let gateway = Arc::new(ScriptedGateway::answering(ANSWER));
        let debate = use_case(gateway).with_params(
            DebateParams::immediate().with_retry(RetryPolicy::default().without_backoff()),
        );
        let mut rng = StdRng::seed_from_u64(1);
        let configuration = configuration().with_turn_budget(5).unwrap();
        let session = debate.prepare(configuration, &registry(), &mut rng).unwrap();

        let outcome = debate
            .run(session, &CancellationToken::new(), &NoDebateProgress)
            .await
            .unwrap();

        let messages = outcome.session.transcript().messages();
        assert_eq!(outcome.session.transcript().assistant_messages().count(), 5);
        assert_eq!(messages[5].persona_name.as_deref(), Some("Physicist"));
    }
}
