//! Turn controller use case.
//!
//! Runs one complete request/response cycle per user input:
//!
//! 1. Accept the input only while [`TurnState::Idle`]
//! 2. Record the user turn
//! 3. Query the remote service (the only suspension point)
//! 4. On success: record the assistant turn and link question and answer
//!    in the topic graph, then stream the answer to the notifier
//! 5. On failure (including a blank response): report the error and mark
//!    the user turn unanswered
//! 6. Return to [`TurnState::Idle`]
//!
//! Dropping the future part-way behaves like a failure: the state returns
//! to idle and an unanswered user turn is marked as such.

use crate::ports::query_client::{QueryClient, QueryError};
use crate::ports::turn_notifier::TurnNotifier;
use crate::streaming::token_streamer::TokenStreamer;
use futures::StreamExt;
use socratic_domain::util::truncate_str;
use socratic_domain::{
    DomainError, GraphSnapshot, Model, ModelParams, SessionContext, Turn, TurnState,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// What happened to a piece of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The service answered; the exchange was recorded.
    Answered { response: String },
    /// The service call failed; only the user turn was recorded.
    Failed(QueryError),
    /// A request was already outstanding; the input was discarded.
    Dropped,
    /// The input was blank; nothing was sent.
    Ignored,
}

/// Holds the turn for the duration of one input.
///
/// On drop the state returns to idle, and a user turn that was recorded
/// but never settled is marked unanswered. This covers cancellation of the
/// `on_user_input` future as well as every early return.
struct TurnGuard<'a> {
    state: &'a Mutex<TurnState>,
    session: &'a Mutex<SessionContext>,
    pending: bool,
}

impl<'a> TurnGuard<'a> {
    fn acquire(state: &'a Mutex<TurnState>, session: &'a Mutex<SessionContext>) -> Option<Self> {
        let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
        if !current.is_idle() {
            return None;
        }
        *current = TurnState::AwaitingResponse;
        Some(Self {
            state,
            session,
            pending: false,
        })
    }

    /// The user turn is in the log and waits for an answer.
    fn mark_pending(&mut self) {
        self.pending = true;
    }

    /// The answer is recorded; nothing to undo on drop.
    fn settle(&mut self) {
        self.pending = false;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if self.pending {
            let abandoned = self
                .session
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .abandon_pending();
            debug!(abandoned, "User turn left without an answer");
        }
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = TurnState::Idle;
    }
}

/// State machine gating one request/response cycle per user input.
///
/// Owns the session's [`SessionContext`] and [`TurnState`]. Methods take
/// `&self`, so a host may share the controller between tasks; input that
/// arrives while a request is outstanding is dropped, not queued.
pub struct TurnController {
    client: Arc<dyn QueryClient>,
    streamer: TokenStreamer,
    model: Model,
    params: ModelParams,
    state: Mutex<TurnState>,
    session: Mutex<SessionContext>,
}

impl TurnController {
    pub fn new(client: Arc<dyn QueryClient>) -> Self {
        Self {
            client,
            streamer: TokenStreamer::default(),
            model: Model::default(),
            params: ModelParams::default(),
            state: Mutex::new(TurnState::Idle),
            session: Mutex::new(SessionContext::new()),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_streamer(mut self, streamer: TokenStreamer) -> Self {
        self.streamer = streamer;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn state(&self) -> TurnState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current conversation, in display order
    pub fn transcript(&self) -> Vec<Turn> {
        self.session().log().all().to_vec()
    }

    /// Positioned view of the current topic graph
    pub fn graph_snapshot(&self) -> GraphSnapshot {
        self.session().graph().snapshot()
    }

    /// Read access to the whole session context
    pub fn with_session<R>(&self, f: impl FnOnce(&SessionContext) -> R) -> R {
        f(&*self.session())
    }

    /// Handle one piece of user input.
    ///
    /// Remote failures are reported through `notifier` and returned as
    /// [`TurnOutcome::Failed`]; the session stays usable. An `Err` means
    /// the conversation log rejected a turn, which is a controller defect.
    pub async fn on_user_input(
        &self,
        input: &str,
        notifier: &dyn TurnNotifier,
    ) -> Result<TurnOutcome, DomainError> {
        let Some(mut guard) = TurnGuard::acquire(&self.state, &self.session) else {
            debug!("Dropping input while a response is outstanding");
            return Ok(TurnOutcome::Dropped);
        };

        if input.trim().is_empty() {
            return Ok(TurnOutcome::Ignored);
        }

        self.record(|session| session.record_user(input))?;
        guard.mark_pending();

        info!(
            model = %self.model,
            "Sending query: {}",
            truncate_str(input, 100)
        );

        notifier.on_query_start(input);
        let result = self
            .client
            .query(input, &self.model, &self.params)
            .await
            .and_then(|response| {
                if response.trim().is_empty() {
                    Err(QueryError::MalformedResponse("empty response".to_string()))
                } else {
                    Ok(response)
                }
            });
        notifier.on_query_end();

        match result {
            Ok(response) => {
                self.record(|session| {
                    session.record_assistant(response.as_str())?;
                    session.link_topics(input, &response);
                    Ok(())
                })?;
                guard.settle();

                let mut chunks = self.streamer.stream(&response);
                while let Some(chunk) = chunks.next().await {
                    notifier.on_chunk(&chunk);
                }
                notifier.on_stream_end();

                debug!(response_len = response.len(), "Turn answered");
                Ok(TurnOutcome::Answered { response })
            }
            Err(e) => {
                warn!(kind = e.kind(), "Query failed: {}", e);
                notifier.on_error(&e);
                Ok(TurnOutcome::Failed(e))
            }
        }
    }

    fn session(&self) -> MutexGuard<'_, SessionContext> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(
        &self,
        f: impl FnOnce(&mut SessionContext) -> Result<(), DomainError>,
    ) -> Result<(), DomainError> {
        let result = f(&mut *self.session());
        if let Err(e) = &result {
            error!("Conversation log rejected a turn: {}", e);
        }
        debug_assert!(result.is_ok(), "conversation log rejected a turn");
        result
    }
}
