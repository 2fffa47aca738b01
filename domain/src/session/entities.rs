//! Session domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// The role that must follow this one
    pub fn next(&self) -> Role {
        match self {
            Role::User => Role::Assistant,
            Role::Assistant => Role::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation (Entity)
///
/// Turns are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only record of a conversation (Entity)
///
/// Insertion order is display order. Roles alternate, starting with
/// [`Role::User`]. A user turn whose request failed can be marked
/// unanswered with [`ConversationLog::abandon_pending`]; only then may
/// another user turn follow it directly.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
    /// Indices of user turns that never got an answer (ascending)
    unanswered: Vec<usize>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, rejecting it if it would break role alternation.
    pub fn append(&mut self, turn: Turn) -> Result<(), DomainError> {
        let expected = self.expected_role();
        if turn.role() != expected {
            return Err(DomainError::InvalidSequence {
                expected,
                found: turn.role(),
            });
        }
        self.turns.push(turn);
        Ok(())
    }

    /// All turns in chronological order
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Role the next appended turn must have
    pub fn expected_role(&self) -> Role {
        match self.turns.last() {
            None => Role::User,
            Some(_) if self.last_is_unanswered() => Role::User,
            Some(turn) => turn.role().next(),
        }
    }

    /// Mark the trailing user turn as unanswered.
    ///
    /// Returns `false` (and changes nothing) when the log does not end on
    /// a pending user turn.
    pub fn abandon_pending(&mut self) -> bool {
        match self.turns.last() {
            Some(turn) if turn.role() == Role::User && !self.last_is_unanswered() => {
                self.unanswered.push(self.turns.len() - 1);
                true
            }
            _ => false,
        }
    }

    /// Whether the turn at `index` is a user turn that never got an answer
    pub fn is_unanswered(&self, index: usize) -> bool {
        self.unanswered.binary_search(&index).is_ok()
    }

    /// Number of completed user→assistant exchanges
    pub fn exchanges(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.role() == Role::Assistant)
            .count()
    }

    fn last_is_unanswered(&self) -> bool {
        self.turns
            .len()
            .checked_sub(1)
            .is_some_and(|last| self.unanswered.last() == Some(&last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_append_alternating() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("What is entropy?")).unwrap();
        log.append(Turn::assistant("Entropy measures disorder."))
            .unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.exchanges(), 1);
        assert_eq!(log.all()[0], Turn::user("What is entropy?"));
        assert_eq!(log.all()[1].role(), Role::Assistant);
    }

    #[test]
    fn test_first_turn_must_be_user() {
        let mut log = ConversationLog::new();
        let err = log.append(Turn::assistant("hello")).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidSequence {
                expected: Role::User,
                found: Role::Assistant,
            }
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_rejects_two_user_turns() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("first")).unwrap();
        let err = log.append(Turn::user("second")).unwrap_err();
        assert!(err.is_invalid_sequence());
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(Turn::content), Some("first"));
    }

    #[test]
    fn test_rejects_two_assistant_turns() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("q")).unwrap();
        log.append(Turn::assistant("a")).unwrap();
        assert!(log.append(Turn::assistant("a again")).is_err());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_expected_role() {
        let mut log = ConversationLog::new();
        assert_eq!(log.expected_role(), Role::User);
        log.append(Turn::user("q")).unwrap();
        assert_eq!(log.expected_role(), Role::Assistant);
    }

    #[test]
    fn test_retry_after_abandoned_turn() {
        let mut log = ConversationLog::new();
        log.append(Turn::user("first try")).unwrap();
        assert!(log.abandon_pending());
        assert!(!log.abandon_pending());

        assert_eq!(log.expected_role(), Role::User);
        assert!(log.append(Turn::assistant("late answer")).is_err());

        log.append(Turn::user("second try")).unwrap();
        log.append(Turn::assistant("answer")).unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(log.exchanges(), 1);
        assert!(log.is_unanswered(0));
        assert!(!log.is_unanswered(1));
    }

    #[test]
    fn test_abandon_requires_pending_user_turn() {
        let mut log = ConversationLog::new();
        assert!(!log.abandon_pending());
        log.append(Turn::user("q")).unwrap();
        log.append(Turn::assistant("a")).unwrap();
        assert!(!log.abandon_pending());
        assert!(log.append(Turn::user("next")).is_ok());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    proptest! {
        #[test]
        fn prop_successful_exchanges_alternate(
            exchanges in proptest::collection::vec(("[a-z ]{1,20}", "[a-z ]{1,20}"), 0..20)
        ) {
            let mut log = ConversationLog::new();
            for (question, answer) in &exchanges {
                log.append(Turn::user(question.clone())).unwrap();
                log.append(Turn::assistant(answer.clone())).unwrap();
            }

            prop_assert_eq!(log.len(), exchanges.len() * 2);
            for (i, turn) in log.all().iter().enumerate() {
                let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
                prop_assert_eq!(turn.role(), expected);
            }
        }
    }
}
