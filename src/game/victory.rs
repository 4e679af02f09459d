//! Win detection

use crate::action_log::GameEvent;
use crate::core::PlayerId;
use crate::game::{GameState, MatchPhase, TurnPhase};

impl GameState {
    /// First participant in seat order holding enough complete sets
    pub fn find_winner(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.complete_set_count() >= self.rules.sets_to_win)
            .map(|p| p.id)
    }

    /// Record a winner if there is one; the match then ends for good
    ///
    /// Called after every step that can change set completeness.
    pub(crate) fn check_winner(&mut self) -> Option<PlayerId> {
        if self.match_phase != MatchPhase::Playing {
            return self.winner;
        }
        let winner = self.find_winner()?;
        self.winner = Some(winner);
        self.match_phase = MatchPhase::Finished;
        self.pending = None;
        self.turn.phase = TurnPhase::Finishing;
        self.log.log(GameEvent::MatchWon { player_id: winner });
        Some(winner)
    }
}
