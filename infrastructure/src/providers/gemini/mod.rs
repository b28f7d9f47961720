//! Gemini provider adapter
//!
//! Implements the LlmGateway port over the Gemini REST API with reqwest.
//! One-shot sends use `generateContent`; streamed turns use
//! `streamGenerateContent?alt=sse`.

pub mod error;
pub mod gateway;
pub mod session;
pub mod types;

pub use error::GeminiError;
pub use gateway::{DEFAULT_BASE_URL, GeminiConfig, GeminiLlmGateway};
pub use session::GeminiSession;
