//! Infrastructure layer for expert-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileDebateConfig, FileModelsConfig, FileOutputConfig,
    FileProviderConfig, FileRetryConfig, FileStorageConfig, Severity,
};
pub use logging::JsonlConversationLogger;
pub use providers::gemini::{GeminiConfig, GeminiError, GeminiLlmGateway, GeminiSession};
pub use storage::{JsonPersonaStore, JsonShareStore};
