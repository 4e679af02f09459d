//! Typed log of everything that happened in a match
//!
//! The engine records what changed, never how to phrase it. The session
//! layer drains the log after each operation and renders its own text.

use crate::core::{ActionKind, CardId, Color, Modifier, PlayerId};
use crate::game::PendingKind;
use serde::{Deserialize, Serialize};

/// Atomic game events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    MatchStarted {
        players: Vec<PlayerId>,
    },

    /// `reshuffled` is set when the discard pile had to be recycled
    CardsDrawn {
        player_id: PlayerId,
        count: usize,
        reshuffled: bool,
    },

    CardBanked {
        player_id: PlayerId,
        card_id: CardId,
    },

    PropertyPlaced {
        player_id: PlayerId,
        card_id: CardId,
        color: Color,
    },

    ActionPlayed {
        player_id: PlayerId,
        card_id: CardId,
        kind: ActionKind,
    },

    RentCharged {
        player_id: PlayerId,
        card_id: CardId,
        color: Color,
        amount: u32,
        doubled: bool,
    },

    PendingOpened {
        kind: PendingKind,
        initiator: PlayerId,
        target: Option<PlayerId>,
    },

    ActionRefused {
        player_id: PlayerId,
        card_id: CardId,
    },

    /// The refusal chain flipped; `awaiting` must answer next
    RolesSwapped {
        awaiting: PlayerId,
    },

    PaymentMade {
        from: PlayerId,
        to: PlayerId,
        cards: Vec<CardId>,
        value: u32,
    },

    PropertyTransferred {
        from: PlayerId,
        to: PlayerId,
        card_id: CardId,
        color: Color,
    },

    SetTransferred {
        from: PlayerId,
        to: PlayerId,
        color: Color,
    },

    ModifierAdded {
        player_id: PlayerId,
        color: Color,
        modifier: Modifier,
    },

    WildcardMoved {
        player_id: PlayerId,
        card_id: CardId,
        from: Color,
        to: Color,
    },

    PendingResolved {
        kind: PendingKind,
        cancelled: bool,
    },

    CardsDiscarded {
        player_id: PlayerId,
        cards: Vec<CardId>,
    },

    TurnPassed {
        from_player: PlayerId,
        to_player: PlayerId,
        turn_number: u32,
    },

    MatchWon {
        player_id: PlayerId,
    },
}

/// Append-only event log
///
/// Events are transient: the owner drains them after each operation and
/// they are left out of serialized state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    /// Events in order (most recent at end)
    #[serde(skip)]
    events: Vec<GameEvent>,

    /// Is logging enabled? (disabled for bulk simulation)
    enabled: bool,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            events: Vec::new(),
            enabled: true,
        }
    }

    /// Create a disabled log (for benchmarking)
    pub fn disabled() -> Self {
        ActionLog {
            events: Vec::new(),
            enabled: false,
        }
    }

    pub fn log(&mut self, event: GameEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn peek(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded at or after position `start`
    pub fn since(&self, start: usize) -> &[GameEvent] {
        &self.events[start.min(self.events.len())..]
    }

    /// Remove and return every recorded event
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banked(n: u32) -> GameEvent {
        GameEvent::CardBanked {
            player_id: PlayerId::new(1),
            card_id: CardId::new(n),
        }
    }

    #[test]
    fn test_action_log() {
        let mut log = ActionLog::new();
        assert!(log.is_empty());

        log.log(banked(1));
        log.log(banked(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.peek(), Some(&banked(2)));
        assert_eq!(log.since(1), &[banked(2)]);
        assert!(log.since(10).is_empty());

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_disabled_log() {
        let mut log = ActionLog::disabled();
        log.log(banked(1));
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&banked(3)).unwrap();
        assert_eq!(json, r#"{"event":"card_banked","player_id":1,"card_id":3}"#);
    }
}
