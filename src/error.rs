//! Error types for the property deal engine

use crate::core::{CardId, Color, PlayerId};
use crate::game::{MatchPhase, TurnPhase};
use thiserror::Error;

/// Broad category of a failure
///
/// Every rejection is local and recoverable by the caller; the category only
/// tells the session layer how to phrase it to the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation came at the wrong time (wrong turn, wrong phase, ...)
    Sequencing,
    /// The operation broke a game rule
    RuleViolation,
    /// A participant, card or set could not be found where expected
    Lookup,
    /// Snapshot persistence failed (collaborator side only)
    Storage,
}

#[derive(Error, Debug)]
pub enum DealError {
    // Sequencing
    #[error("It is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("Operation not allowed in the {actual:?} phase")]
    WrongPhase { actual: TurnPhase },

    #[error("Match is {actual:?}, operation requires {expected:?}")]
    WrongMatchPhase { expected: MatchPhase, actual: MatchPhase },

    #[error("A pending action must be resolved first")]
    PendingActionUnresolved,

    #[error("There is no pending action to respond to")]
    NoPendingAction,

    #[error("Player {0} has already responded to this action")]
    AlreadyResponded(PlayerId),

    #[error("Player {0} is not expected to respond to this action")]
    NotARespondent(PlayerId),

    // Rule violations
    #[error("Card {card} cannot be placed as {color}")]
    IllegalWildcardColor { card: CardId, color: Color },

    #[error("The {0} set is not complete")]
    IncompleteSet(Color),

    #[error("Payment of {offered} does not cover the required {required}")]
    InsufficientPayment { offered: u32, required: u32 },

    #[error("Card misuse: {0}")]
    CardMisuse(String),

    #[error("Matches need between {min} and {max} participants, found {found}")]
    InvalidPlayerCount { found: usize, min: usize, max: usize },

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid discard: {0}")]
    InvalidDiscard(String),

    // Lookups
    #[error("Unknown participant: {0}")]
    UnknownParticipant(PlayerId),

    #[error("Card {card} not found in {container}")]
    CardNotFound { card: CardId, container: String },

    #[error("Player {player} has no {color} set")]
    SetNotFound { player: PlayerId, color: Color },

    // Storage
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DealError {
    pub fn kind(&self) -> ErrorKind {
        use DealError::*;
        match self {
            NotYourTurn(_)
            | WrongPhase { .. }
            | WrongMatchPhase { .. }
            | PendingActionUnresolved
            | NoPendingAction
            | AlreadyResponded(_)
            | NotARespondent(_) => ErrorKind::Sequencing,
            IllegalWildcardColor { .. }
            | IncompleteSet(_)
            | InsufficientPayment { .. }
            | CardMisuse(_)
            | InvalidPlayerCount { .. }
            | InvalidModifier(_)
            | InvalidTarget(_)
            | InvalidDiscard(_) => ErrorKind::RuleViolation,
            UnknownParticipant(_) | CardNotFound { .. } | SetNotFound { .. } => ErrorKind::Lookup,
            IoError(_) | SerializationError(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn card_not_found(card: CardId, container: impl Into<String>) -> Self {
        DealError::CardNotFound {
            card,
            container: container.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DealError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(DealError::NoPendingAction.kind(), ErrorKind::Sequencing);
        assert_eq!(
            DealError::InsufficientPayment { offered: 2, required: 3 }.kind(),
            ErrorKind::RuleViolation
        );
        assert_eq!(
            DealError::UnknownParticipant(PlayerId::new(9)).kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_error_messages() {
        let err = DealError::InsufficientPayment { offered: 2, required: 3 };
        assert_eq!(err.to_string(), "Payment of 2 does not cover the required 3");

        let err = DealError::IncompleteSet(Color::Green);
        assert_eq!(err.to_string(), "The green set is not complete");
    }
}
