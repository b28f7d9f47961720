//! Debate domain.
//!
//! - [`configuration::DebateConfiguration`] - topic, four experts, turn budget
//! - [`assignment::ModelPool`] / [`assignment::ModelAssignment`] - shuffled slot → model binding
//! - [`transcript::Transcript`] - append-only message history
//! - [`session::DebateSession`] - the `Idle → Running → … → Concluded` state machine
//! - [`verdict::Verdict`] - the adjudicated outcome

pub mod assignment;
pub mod configuration;
pub mod session;
pub mod transcript;
pub mod verdict;
