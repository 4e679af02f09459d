//! Game initialization from a seat list
//!
//! Builds a started `GameState` in one call, for the CLI, the tournament
//! runner and tests.

use crate::core::{PlayerId, RoomId};
use crate::game::{GameState, RuleSet};
use crate::Result;

/// Game builder for initializing matches
#[derive(Debug, Clone)]
pub struct GameInitializer {
    room: RoomId,
    rules: RuleSet,
    seed: u64,
}

impl GameInitializer {
    pub fn new(room: impl Into<RoomId>) -> Self {
        GameInitializer {
            room: room.into(),
            rules: RuleSet::default(),
            seed: 0,
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Seed for the shuffle
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Seat the named participants in order and deal the opening hands
    pub fn init_game<S: AsRef<str>>(&self, names: &[S]) -> Result<(GameState, Vec<PlayerId>)> {
        let mut game = GameState::with_rules(self.room.clone(), self.rules.clone(), self.seed)?;
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(game.add_participant(name.as_ref(), None)?);
        }
        game.start_match()?;
        Ok((game, ids))
    }

    /// Like `init_game` with seats named "Player 1", "Player 2", ...
    pub fn init_numbered(&self, seats: usize) -> Result<(GameState, Vec<PlayerId>)> {
        let names: Vec<String> = (1..=seats).map(|n| format!("Player {n}")).collect();
        self.init_game(&names)
    }
}
