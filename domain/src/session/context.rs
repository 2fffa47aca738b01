//! Session-scoped state

use super::entities::{ConversationLog, Turn};
use crate::core::error::DomainError;
use crate::topic::graph::TopicGraph;

/// Everything a single chat session owns.
///
/// Created when the session starts and dropped when it ends. Nothing in
/// here is shared with other sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    log: ConversationLog,
    graph: TopicGraph,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn graph(&self) -> &TopicGraph {
        &self.graph
    }

    pub fn record_user(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.log.append(Turn::user(content))
    }

    pub fn record_assistant(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.log.append(Turn::assistant(content))
    }

    /// Mark the pending user turn as unanswered so the user may retry.
    pub fn abandon_pending(&mut self) -> bool {
        self.log.abandon_pending()
    }

    /// Link the question to the answer in the topic graph.
    ///
    /// The whole answer becomes a single related topic.
    pub fn link_topics(&mut self, question: &str, answer: &str) {
        self.graph.add_related(question, [answer]);
    }
}
