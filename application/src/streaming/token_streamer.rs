//! Word-by-word streaming of a complete response.
//!
//! The remote service answers in one piece; [`TokenStreamer`] replays the
//! text as a paced sequence of chunks so it can be displayed progressively.

use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use std::time::Duration;

/// Default pause between chunks
pub const DEFAULT_PACING: Duration = Duration::from_millis(50);

/// Lazily produced, single-use sequence of display chunks
pub type TokenStream = BoxStream<'static, String>;

/// Split `text` into display chunks: one word plus a trailing space each.
pub fn chunks(text: &str) -> Vec<String> {
    text.split_whitespace().map(|word| format!("{word} ")).collect()
}

/// Turns complete text into a paced stream of chunks
#[derive(Debug, Clone, Copy)]
pub struct TokenStreamer {
    pacing: Duration,
}

impl Default for TokenStreamer {
    fn default() -> Self {
        Self::new(DEFAULT_PACING)
    }
}

impl TokenStreamer {
    pub fn new(pacing: Duration) -> Self {
        Self { pacing }
    }

    /// Streamer that emits all chunks without pausing
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Stream `text` chunk by chunk, sleeping `pacing` between chunks.
    ///
    /// The returned stream owns its chunks; once drained it is finished.
    pub fn stream(&self, text: &str) -> TokenStream {
        let pending: VecDeque<String> = chunks(text).into();
        let pacing = self.pacing;

        stream::unfold((pending, true), move |(mut pending, first)| async move {
            let chunk = pending.pop_front()?;
            if !first && !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }
            Some((chunk, (pending, false)))
        })
        .fuse()
        .boxed()
    }
}
