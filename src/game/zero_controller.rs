//! Zero controller for testing and automation
//!
//! Always takes the first legal intent. Useful for deterministic games that
//! need no input.

use crate::core::PlayerId;
use crate::game::controller::{Intent, PlayerController};
use crate::game::view::GameView;

/// A controller that always chooses the first legal intent (index 0)
pub struct ZeroController {
    player_id: PlayerId,
}

impl ZeroController {
    pub fn new(player_id: PlayerId) -> Self {
        ZeroController { player_id }
    }
}

impl PlayerController for ZeroController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_intent(&mut self, _view: &GameView, legal: &[Intent]) -> Option<Intent> {
        legal.first().cloned()
    }

    fn name(&self) -> &str {
        "zero"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_zero_controller_chooses_first() {
        let mut game = GameState::with_seed("room", 1);
        let a = game.add_participant("Alice", None).unwrap();
        game.add_participant("Bob", None).unwrap();
        game.start_match().unwrap();
        let view = game.view_for(a).unwrap();

        let mut controller = ZeroController::new(a);
        let legal = game.legal_intents(a);
        assert_eq!(controller.choose_intent(&view, &legal), Some(Intent::Draw));
        assert_eq!(controller.choose_intent(&view, &[]), None);
    }
}
