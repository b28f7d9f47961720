//! Application-level configuration.
//!
//! - [`DebateParams`] - turn pacing and the per-turn [`RetryPolicy`]
//! - [`ModelSettings`] - which models play each role

pub mod debate_params;
pub mod model_settings;

pub use debate_params::{DebateParams, RetryPolicy};
pub use model_settings::ModelSettings;
