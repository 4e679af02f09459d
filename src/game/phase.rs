//! Match lifecycle and turn phases

use serde::{Deserialize, Serialize};

/// Lifecycle of a whole match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Seating participants, nothing dealt yet
    Waiting,
    Playing,
    /// Terminal: a winner has been recorded
    Finished,
}

/// Phases within one participant's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Must draw before acting
    Draw,
    /// Playing cards from hand
    Action,
    /// Waiting on responses to a pending action
    Responding,
    /// Hand is over the limit and must be trimmed
    Discard,
    /// Done playing; wildcards may still be rearranged
    Finishing,
}

impl TurnPhase {
    /// Can the active participant end the turn from here?
    pub fn can_end_turn(&self) -> bool {
        matches!(self, TurnPhase::Action | TurnPhase::Finishing)
    }

    /// Can the active participant rearrange wildcards from here?
    pub fn can_rearrange(&self) -> bool {
        matches!(self, TurnPhase::Action | TurnPhase::Finishing)
    }
}

/// Represents the current turn structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1)
    pub turn_number: u32,

    /// Active participant's index in `GameState::players`
    pub current_idx: usize,

    pub phase: TurnPhase,

    /// Card plays left this turn
    pub actions_remaining: u8,
}

impl TurnStructure {
    pub fn new(actions_per_turn: u8) -> Self {
        TurnStructure {
            turn_number: 1,
            current_idx: 0,
            phase: TurnPhase::Draw,
            actions_remaining: actions_per_turn,
        }
    }

    /// Spend `count` card plays
    pub fn spend(&mut self, count: u8) {
        self.actions_remaining = self.actions_remaining.saturating_sub(count);
    }

    pub fn budget_exhausted(&self) -> bool {
        self.actions_remaining == 0
    }

    /// Phase after a play or a resolved action
    ///
    /// A hand over the limit forces a discard even with plays left.
    /// Otherwise the participant keeps acting until the budget is spent.
    pub fn settled_phase(&self, hand_size: usize, hand_limit: usize) -> TurnPhase {
        if hand_size > hand_limit {
            TurnPhase::Discard
        } else if self.budget_exhausted() {
            TurnPhase::Finishing
        } else {
            TurnPhase::Action
        }
    }

    /// Start the next participant's turn
    pub fn next_turn(&mut self, next_idx: usize, actions_per_turn: u8) {
        self.turn_number += 1;
        self.current_idx = next_idx;
        self.phase = TurnPhase::Draw;
        self.actions_remaining = actions_per_turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_structure() {
        let mut turn = TurnStructure::new(3);
        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.phase, TurnPhase::Draw);

        turn.spend(2);
        assert_eq!(turn.actions_remaining, 1);
        turn.spend(5);
        assert!(turn.budget_exhausted());

        turn.next_turn(1, 3);
        assert_eq!(turn.turn_number, 2);
        assert_eq!(turn.current_idx, 1);
        assert_eq!(turn.phase, TurnPhase::Draw);
        assert_eq!(turn.actions_remaining, 3);
    }

    #[test]
    fn test_settled_phase() {
        let mut turn = TurnStructure::new(3);
        turn.spend(1);
        assert_eq!(turn.settled_phase(9, 7), TurnPhase::Discard);
        assert_eq!(turn.settled_phase(7, 7), TurnPhase::Action);
        turn.spend(2);
        assert_eq!(turn.settled_phase(8, 7), TurnPhase::Discard);
        assert_eq!(turn.settled_phase(7, 7), TurnPhase::Finishing);
    }

    #[test]
    fn test_phase_permissions() {
        assert!(TurnPhase::Action.can_end_turn());
        assert!(TurnPhase::Finishing.can_end_turn());
        assert!(!TurnPhase::Responding.can_end_turn());
        assert!(!TurnPhase::Draw.can_rearrange());
    }
}
