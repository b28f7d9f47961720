//! Debate session: the explicit state machine behind a running debate
//!
//! ```text
//! Idle ──start──▶ Running ──stop──▶ Stopped ───┐
//!                    │                         ├─begin_adjudication─▶ Adjudicating ──conclude──▶ Concluded
//!                    └──(budget reached)──▶ Exhausted ─┘
//! ```
//!
//! Every transition consumes the session and returns the next one, so a
//! caller cannot keep using a stale state. `reset` is available from any
//! phase and returns to `Idle`.

use super::assignment::ModelAssignment;
use super::configuration::DebateConfiguration;
use super::transcript::{Transcript, TurnMessage};
use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::persona::entities::Persona;
use crate::persona::registry::PersonaRegistry;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    #[default]
    Idle,
    Running,
    Stopped,
    Exhausted,
    Adjudicating,
    Concluded,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Idle => "idle",
            DebatePhase::Running => "running",
            DebatePhase::Stopped => "stopped",
            DebatePhase::Exhausted => "exhausted",
            DebatePhase::Adjudicating => "adjudicating",
            DebatePhase::Concluded => "concluded",
        }
    }

    /// Progression has ended and adjudication may begin
    pub fn is_halted(&self) -> bool {
        matches!(self, DebatePhase::Stopped | DebatePhase::Exhausted)
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The slot about to speak
#[derive(Debug, Clone, Copy)]
pub struct TurnSlot<'a> {
    pub turn_index: usize,
    pub slot: usize,
    pub persona: &'a Persona,
    pub model: &'a Model,
}

/// A debate's full state
#[derive(Debug, Clone, Default)]
pub struct DebateSession {
    phase: DebatePhase,
    configuration: Option<DebateConfiguration>,
    personas: Vec<Persona>,
    assignment: Option<ModelAssignment>,
    transcript: Transcript,
    turn_index: usize,
    verdict: Option<String>,
}

impl DebateSession {
    /// A fresh, idle session
    pub fn new() -> Self {
        Self::default()
    }

    fn invalid(&self, action: &'static str) -> DomainError {
        DomainError::InvalidTransition {
            action,
            phase: self.phase.as_str(),
        }
    }

    /// `Idle → Running`. Resolves the personas, binds the model assignment and
    /// seeds the transcript with the topic. Nothing changes on error.
    pub fn start(
        self,
        configuration: DebateConfiguration,
        registry: &PersonaRegistry,
        assignment: ModelAssignment,
    ) -> Result<Self, DomainError> {
        if self.phase != DebatePhase::Idle {
            return Err(self.invalid("start"));
        }
        let personas = registry.resolve(configuration.persona_ids())?;

        let mut transcript = Transcript::new();
        transcript.push(TurnMessage::seed(configuration.topic().content()));

        Ok(Self {
            phase: DebatePhase::Running,
            configuration: Some(configuration),
            personas,
            assignment: Some(assignment),
            transcript,
            turn_index: 0,
            verdict: None,
        })
    }

    /// The persona and model due for the next turn, while running
    pub fn current_turn(&self) -> Option<TurnSlot<'_>> {
        if self.phase != DebatePhase::Running {
            return None;
        }
        let assignment = self.assignment.as_ref()?;
        let slot = DebateConfiguration::slot_for_turn(self.turn_index);
        Some(TurnSlot {
            turn_index: self.turn_index,
            slot,
            persona: self.personas.get(slot)?,
            model: assignment.for_slot(slot),
        })
    }

    /// Append a settled turn (real content or fallback) and advance.
    /// Reaching the turn budget moves the session to `Exhausted`.
    pub fn record_turn(mut self, message: TurnMessage) -> Result<Self, DomainError> {
        let expected = match self.current_turn() {
            Some(turn) => turn.persona.id().clone(),
            None => return Err(self.invalid("record a turn")),
        };
        if !message.is_assistant() || message.persona_id.as_ref() != Some(&expected) {
            return Err(DomainError::UnexpectedTurn(format!(
                "expected an assistant message from '{}'",
                expected
            )));
        }

        self.transcript.push(message);
        self.turn_index += 1;
        if self.turn_index >= self.turn_budget() {
            self.phase = DebatePhase::Exhausted;
        }
        Ok(self)
    }

    /// `Running → Stopped`. Stopping an exhausted debate is a no-op.
    pub fn stop(mut self) -> Result<Self, DomainError> {
        match self.phase {
            DebatePhase::Running => {
                self.phase = DebatePhase::Stopped;
                Ok(self)
            }
            DebatePhase::Stopped | DebatePhase::Exhausted => Ok(self),
            _ => Err(self.invalid("stop")),
        }
    }

    /// `Stopped | Exhausted → Adjudicating`
    pub fn begin_adjudication(mut self) -> Result<Self, DomainError> {
        if !self.phase.is_halted() {
            return Err(self.invalid("adjudicate"));
        }
        self.phase = DebatePhase::Adjudicating;
        Ok(self)
    }

    /// `Adjudicating → Concluded`, appending the single judge message
    pub fn conclude(mut self, verdict: impl Into<String>) -> Result<Self, DomainError> {
        if self.phase != DebatePhase::Adjudicating {
            return Err(self.invalid("conclude"));
        }
        let verdict = verdict.into();
        self.transcript.push(TurnMessage::judge(verdict.clone()));
        self.verdict = Some(verdict);
        self.phase = DebatePhase::Concluded;
        Ok(self)
    }

    /// Back to `Idle`, dropping transcript, turn index, assignment and verdict
    pub fn reset(self) -> Self {
        Self::new()
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn configuration(&self) -> Option<&DebateConfiguration> {
        self.configuration.as_ref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.configuration.as_ref().map(|c| c.topic().content())
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn assignment(&self) -> Option<&ModelAssignment> {
        self.assignment.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn turn_budget(&self) -> usize {
        self.configuration
            .as_ref()
            .map(|c| c.turn_budget())
            .unwrap_or(0)
    }

    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
    }
}
