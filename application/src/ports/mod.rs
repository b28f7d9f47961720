//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod persona_store;
pub mod progress;
pub mod share_store;
