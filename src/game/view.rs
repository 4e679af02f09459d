//! Per-viewer projection of the game state
//!
//! The view shows everything on the table but only the viewer's own hand;
//! other hands are reduced to their size.

use crate::core::{CardId, PlayerId, PlayerName, PropertySet, RoomId};
use crate::game::{GameState, MatchPhase, PendingAction, TurnPhase};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: PlayerName,
    pub connected: bool,
    /// Only present for the viewer
    pub hand: Option<Vec<CardId>>,
    pub hand_size: usize,
    pub bank: Vec<CardId>,
    pub sets: Vec<PropertySet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub room: RoomId,
    pub viewer: PlayerId,
    pub match_phase: MatchPhase,
    pub turn_number: u32,
    pub current_player: Option<PlayerId>,
    pub phase: TurnPhase,
    pub actions_remaining: u8,
    pub draw_pile_size: usize,
    pub discard_top: Option<CardId>,
    pub discard_size: usize,
    pub pending: Option<PendingAction>,
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerView>,
}

impl GameState {
    /// Read-only snapshot for one participant
    pub fn view_for(&self, viewer: PlayerId) -> Result<GameView> {
        self.get_player(viewer)?;
        let players = self
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.name.clone(),
                connected: p.connected,
                hand: (p.id == viewer).then(|| p.hand.clone()),
                hand_size: p.hand.len(),
                bank: p.bank.clone(),
                sets: p.sets.clone(),
            })
            .collect();

        Ok(GameView {
            room: self.room.clone(),
            viewer,
            match_phase: self.match_phase,
            turn_number: self.turn.turn_number,
            current_player: self.current_player_id(),
            phase: self.turn.phase,
            actions_remaining: self.turn.actions_remaining,
            draw_pile_size: self.draw_pile.len(),
            discard_top: self.discard_pile.peek_top(),
            discard_size: self.discard_pile.len(),
            pending: self.pending.clone(),
            winner: self.winner,
            players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DealError;

    #[test]
    fn test_view_redacts_other_hands() {
        let mut game = GameState::with_seed("room", 5);
        let a = game.add_participant("Alice", None).unwrap();
        let b = game.add_participant("Bob", None).unwrap();
        game.start_match().unwrap();

        let view = game.view_for(a).unwrap();
        assert_eq!(view.players[0].hand.as_ref().map(|h| h.len()), Some(5));
        assert_eq!(view.players[1].hand, None);
        assert_eq!(view.players[1].hand_size, 5);
        assert_eq!(view.draw_pile_size, 100);

        let other = game.view_for(b).unwrap();
        assert_eq!(other.players[0].hand, None);
        assert_eq!(other.players[1].hand.as_ref(), Some(&game.players[1].hand));
        let json = serde_json::to_value(&other).unwrap();
        assert!(json["players"][0]["hand"].is_null());
    }

    #[test]
    fn test_view_for_unknown_viewer() {
        let game = GameState::with_seed("room", 5);
        assert!(matches!(
            game.view_for(PlayerId::new(4)),
            Err(DealError::UnknownParticipant(_))
        ));
    }
}
