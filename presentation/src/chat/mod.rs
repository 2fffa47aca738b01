//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over a
//! [`TurnController`](socratic_application::TurnController).

mod repl;

pub use repl::ChatRepl;
