//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate.

use debate_domain::{Model, Persona, TurnMessage, Verdict};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways. `on_message_appended` is the transcript sink:
/// it fires once per message, in transcript order.
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once the session is running, with the slot bindings
    fn on_debate_start(
        &self,
        _topic: &str,
        _personas: &[Persona],
        _models: &[Model],
        _turn_budget: usize,
    ) {
    }

    /// Called when a persona starts its turn
    fn on_turn_start(&self, _turn_index: usize, _persona: &Persona, _model: &Model) {}

    /// Called for each streamed text chunk of the current turn
    fn on_turn_chunk(&self, _persona: &Persona, _chunk: &str) {}

    /// Called when an attempt fails and another one will follow
    fn on_turn_retry(&self, _persona: &Persona, _attempt: usize, _reason: &str) {}

    /// Called for every message appended to the transcript
    fn on_message_appended(&self, message: &TurnMessage);

    /// Called when the judge is asked for a verdict
    fn on_adjudication_start(&self, _model: &Model) {}

    /// Called with the final verdict
    fn on_verdict(&self, _verdict: &Verdict) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoDebateProgress;

impl DebateProgressNotifier for NoDebateProgress {
    fn on_message_appended(&self, _message: &TurnMessage) {}
}
