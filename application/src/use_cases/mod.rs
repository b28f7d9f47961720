//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod adjudicate;
pub mod describe_persona;
pub mod generate_turn;
pub mod manage_personas;
pub mod run_debate;
pub mod share_debate;

#[cfg(test)]
pub(crate) mod test_support;
