//! Domain layer for socratic-chat
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A session is an alternating sequence of [`Turn`]s kept in a
//! [`ConversationLog`]. Turns are immutable and the log is append-only.
//!
//! ## Topic graph
//!
//! Every answered turn links the user's input to the model's response in a
//! [`TopicGraph`], an undirected graph that is rendered as a mind map.

pub mod core;
pub mod session;
pub mod topic;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, params::ModelParams};
pub use session::{
    context::SessionContext,
    entities::{ConversationLog, Role, Turn},
    turn_state::TurnState,
};
pub use topic::{
    graph::{TopicEdge, TopicGraph},
    layout::{GraphSnapshot, NodePosition, PositionedTopic},
};
