//! Presentation layer for expert-debate
//!
//! This crate contains CLI definitions, output formatters
//! and the live debate reporter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, DebateArgs, ExpertsAction, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::DebateReporter;
