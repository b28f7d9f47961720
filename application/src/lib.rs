//! Application layer for expert-debate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateParams, ModelSettings, RetryPolicy};
pub use ports::{
    clock::{Sleeper, TokioSleeper},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle},
    persona_store::{PersonaStore, PersonaStoreError},
    progress::{DebateProgressNotifier, NoDebateProgress},
    share_store::{ShareError, ShareStore},
};
pub use use_cases::adjudicate::{AdjudicateUseCase, VerdictRequest};
pub use use_cases::describe_persona::{DescribePersonaError, DescribePersonaUseCase};
pub use use_cases::generate_turn::{GenerateTurnUseCase, TurnError, TurnRequest};
pub use use_cases::manage_personas::{ManagePersonasError, ManagePersonasUseCase};
pub use use_cases::run_debate::{DebateOutcome, RunDebateError, RunDebateUseCase};
pub use use_cases::share_debate::ShareDebateUseCase;
