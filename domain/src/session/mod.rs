//! Chat session domain.
//!
//! - [`entities::Turn`] - a single message within a session
//! - [`entities::ConversationLog`] - append-only, role-alternating turn list
//! - [`context::SessionContext`] - everything one session owns
//! - [`turn_state::TurnState`] - whether a request is currently outstanding

pub mod context;
pub mod entities;
pub mod turn_state;
