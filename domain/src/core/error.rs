//! Domain error types

use crate::session::entities::Role;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Appending the turn would break user/assistant alternation.
    ///
    /// This is never caused by user input; it means the caller appended
    /// turns out of order.
    #[error("Invalid turn sequence: expected {expected} turn, got {found}")]
    InvalidSequence { expected: Role, found: Role },
}

impl DomainError {
    /// Check if this error represents a broken turn sequence
    pub fn is_invalid_sequence(&self) -> bool {
        matches!(self, DomainError::InvalidSequence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sequence_display() {
        let error = DomainError::InvalidSequence {
            expected: Role::Assistant,
            found: Role::User,
        };
        assert_eq!(
            error.to_string(),
            "Invalid turn sequence: expected assistant turn, got user"
        );
        assert!(error.is_invalid_sequence());
    }
}
