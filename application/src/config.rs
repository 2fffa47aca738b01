//! Application-level configuration.
//!
//! This module provides configuration types that control how the turn
//! controller behaves, such as request timeouts and display pacing.

use crate::streaming::token_streamer::{DEFAULT_PACING, TokenStreamer};
use std::time::Duration;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for the remote service before giving up.
    pub timeout: Option<Duration>,
    /// Pause between displayed chunks of a response.
    pub stream_pacing: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            stream_pacing: DEFAULT_PACING,
        }
    }
}

impl BehaviorConfig {
    /// Builds a BehaviorConfig from optional raw values.
    ///
    /// If `timeout_seconds` is `None`, no timeout is applied.
    pub fn from_raw(timeout_seconds: Option<u64>, stream_pacing_ms: u64) -> Self {
        Self {
            timeout: timeout_seconds.map(Duration::from_secs),
            stream_pacing: Duration::from_millis(stream_pacing_ms),
        }
    }

    /// Token streamer configured with this pacing
    pub fn streamer(&self) -> TokenStreamer {
        TokenStreamer::new(self.stream_pacing)
    }
}
