//! Prompt domain
//!
//! Templates for the turn, judge and description-assist prompts.

mod template;

pub use template::{DebatePromptTemplate, OPINION_SEPARATOR};
