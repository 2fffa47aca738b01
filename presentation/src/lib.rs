//! Presentation layer for socratic-chat
//!
//! This crate contains CLI definitions, output formatters,
//! turn progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use output::console::{ConsoleFormatter, GraphFormat};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
