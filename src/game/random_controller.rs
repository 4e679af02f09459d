//! Random AI controller for testing and baseline gameplay
//!
//! Makes uniform random choices from the legal intents.

use crate::core::PlayerId;
use crate::game::controller::{Intent, PlayerController};
use crate::game::view::GameView;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// A controller that makes random choices
pub struct RandomController {
    player_id: PlayerId,
    rng: Xoshiro256PlusPlus,
}

impl RandomController {
    /// Create a new random controller seeded from entropy
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_intent(&mut self, _view: &GameView, legal: &[Intent]) -> Option<Intent> {
        if legal.is_empty() {
            None
        } else {
            let index = self.rng.gen_range(0..legal.len());
            Some(legal[index].clone())
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    fn view() -> (GameView, PlayerId) {
        let mut game = GameState::with_seed("room", 1);
        let a = game.add_participant("Alice", None).unwrap();
        game.add_participant("Bob", None).unwrap();
        game.start_match().unwrap();
        (game.view_for(a).unwrap(), a)
    }

    #[test]
    fn test_choose_from_empty_intents() {
        let (view, a) = view();
        let mut controller = RandomController::with_seed(a, 42);
        assert_eq!(controller.choose_intent(&view, &[]), None);
    }

    #[test]
    fn test_choice_is_one_of_the_options() {
        let (view, a) = view();
        let mut controller = RandomController::with_seed(a, 42);
        let legal = vec![Intent::Draw, Intent::EndTurn];
        let choice = controller.choose_intent(&view, &legal).unwrap();
        assert!(legal.contains(&choice));
    }

    #[test]
    fn test_seeded_determinism() {
        let (view, a) = view();
        let mut c1 = RandomController::with_seed(a, 42);
        let mut c2 = RandomController::with_seed(a, 42);
        let legal: Vec<Intent> = (0..10)
            .map(|i| Intent::Discard {
                cards: vec![crate::core::CardId::new(i)],
            })
            .collect();

        for _ in 0..20 {
            assert_eq!(c1.choose_intent(&view, &legal), c2.choose_intent(&view, &legal));
        }
    }
}
