//! Domain layer for expert-debate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Four expert personas argue a topic in a fixed round-robin. Each slot is
//! bound to one model for the whole debate, the transcript only ever grows,
//! and a judge closes the debate with a single verdict.
//!
//! ## Session
//!
//! [`DebateSession`] is the explicit state machine
//! (`Idle → Running → Stopped | Exhausted → Adjudicating → Concluded`).
//! Transitions consume the session and return the next state.

pub mod core;
pub mod debate;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod share;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, string::preview, topic::Topic};
pub use debate::{
    assignment::{ModelAssignment, ModelPool, SLOT_COUNT},
    configuration::{DEFAULT_TURN_BUDGET, DebateConfiguration},
    session::{DebatePhase, DebateSession, TurnSlot},
    transcript::{Transcript, TurnMessage, TurnRole},
    verdict::{NO_OPINIONS_VERDICT, UNAVAILABLE_VERDICT, Verdict, VerdictSource},
};
pub use persona::{
    entities::{Persona, PersonaId},
    registry::PersonaRegistry,
};
pub use prompt::{DebatePromptTemplate, OPINION_SEPARATOR};
pub use session::{
    entities::{Message, Role},
    stream::StreamEvent,
};
pub use share::{ShareId, ShareRecord};
