//! Turn notification port
//!
//! Defines how the turn controller reports what happens during a turn.

use super::query_client::QueryError;

/// Callback for progress updates during a chat turn
///
/// Implementations live in the presentation layer and can display
/// the turn in various ways (console, web UI, etc.)
pub trait TurnNotifier: Send + Sync {
    /// Called right before the query is sent
    fn on_query_start(&self, _input: &str) {}

    /// Called when the query returns, successfully or not
    fn on_query_end(&self) {}

    /// Called for each display chunk of a successful response
    fn on_chunk(&self, chunk: &str);

    /// Called after the last chunk
    fn on_stream_end(&self) {}

    /// Called when the query failed
    fn on_error(&self, error: &QueryError);
}

/// No-op notifier for when nothing needs to be displayed
pub struct NoTurnNotifier;

impl TurnNotifier for NoTurnNotifier {
    fn on_chunk(&self, _chunk: &str) {}
    fn on_error(&self, _error: &QueryError) {}
}
