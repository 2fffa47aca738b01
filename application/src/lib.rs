//! Application layer for socratic-chat
//!
//! This crate contains the turn controller, the token streamer, port
//! definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod streaming;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    query_client::{QueryClient, QueryError},
    turn_notifier::{NoTurnNotifier, TurnNotifier},
};
pub use streaming::token_streamer::{TokenStream, TokenStreamer, chunks};
pub use use_cases::turn_controller::{TurnController, TurnOutcome};
