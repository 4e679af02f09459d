//! Tournament mode for running many random games in parallel
//!
//! Games run concurrently with rayon. Each game's shuffle and controller
//! seeds derive from the master seed and the game index, so a tournament
//! is reproducible regardless of thread scheduling.

use crate::game::{GameEndReason, GameLoop, PlayerController, RandomController, RuleSet, VerbosityLevel};
use crate::loader::GameInitializer;
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::fmt;
use std::time::{Duration, Instant};

/// Tournament settings
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub games: usize,
    pub players: usize,
    pub seed: u64,
    pub max_turns: u32,
    pub rules: RuleSet,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 100,
            players: 2,
            seed: 42,
            max_turns: 1000,
            rules: RuleSet::default(),
        }
    }
}

/// Outcome of a single tournament game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub index: usize,
    pub seed: u64,
    /// Seat index of the winner
    pub winning_seat: Option<usize>,
    pub turns: u32,
    pub end_reason: GameEndReason,
}

/// Aggregated tournament statistics
#[derive(Debug, Clone)]
pub struct TournamentReport {
    pub games: Vec<GameSummary>,
    /// Wins per seat index
    pub seat_wins: Vec<usize>,
    pub turn_limit_games: usize,
    pub stalled_games: usize,
    pub elapsed: Duration,
}

impl TournamentReport {
    pub fn average_turns(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let total: u64 = self.games.iter().map(|g| g.turns as u64).sum();
        total as f64 / self.games.len() as f64
    }

    pub fn decided_games(&self) -> usize {
        self.seat_wins.iter().sum()
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.games.len();
        writeln!(f, "=== Tournament Results ===")?;
        writeln!(f, "Games played: {total}")?;
        for (seat, wins) in self.seat_wins.iter().enumerate() {
            let pct = if total > 0 { *wins as f64 * 100.0 / total as f64 } else { 0.0 };
            writeln!(f, "  Seat {}: {wins} wins ({pct:.1}%)", seat + 1)?;
        }
        writeln!(f, "Turn limit reached: {}", self.turn_limit_games)?;
        writeln!(f, "Stalled: {}", self.stalled_games)?;
        writeln!(f, "Average turns: {:.1}", self.average_turns())?;
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            write!(f, "Elapsed: {secs:.2}s ({:.1} games/sec)", total as f64 / secs)
        } else {
            write!(f, "Elapsed: {secs:.2}s")
        }
    }
}

/// Seed for game `index` of a tournament
pub fn game_seed(master: u64, index: usize) -> u64 {
    Xoshiro256PlusPlus::seed_from_u64(master.wrapping_add(index as u64)).gen()
}

/// Play one silent random game and check that no card went missing
pub fn play_one(config: &TournamentConfig, index: usize) -> Result<GameSummary> {
    let seed = game_seed(config.seed, index);
    let (mut game, ids) = GameInitializer::new(format!("tourney-{index}"))
        .with_rules(config.rules.clone())
        .with_seed(seed)
        .init_numbered(config.players)?;

    let mut controllers: Vec<Box<dyn PlayerController>> = ids
        .iter()
        .enumerate()
        .map(|(seat, &id)| {
            let controller_seed = seed.wrapping_add((seat as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            Box::new(RandomController::with_seed(id, controller_seed)) as Box<dyn PlayerController>
        })
        .collect();

    let result = GameLoop::new(&mut game)
        .with_verbosity(VerbosityLevel::Silent)
        .with_max_turns(config.max_turns)
        .run_game(&mut controllers)?;

    game.check_conservation()?;

    Ok(GameSummary {
        index,
        seed,
        winning_seat: result.winner.and_then(|w| ids.iter().position(|&id| id == w)),
        turns: result.turns_played,
        end_reason: result.end_reason,
    })
}

/// Run `config.games` games in parallel and aggregate the results
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentReport> {
    config.rules.validate()?;
    let start = Instant::now();

    let games = (0..config.games)
        .into_par_iter()
        .map(|index| play_one(config, index))
        .collect::<Result<Vec<_>>>()?;

    let mut seat_wins = vec![0; config.players];
    let mut turn_limit_games = 0;
    let mut stalled_games = 0;
    for game in &games {
        match game.end_reason {
            GameEndReason::Winner(_) => {
                if let Some(seat) = game.winning_seat {
                    seat_wins[seat] += 1;
                }
            }
            GameEndReason::TurnLimit => turn_limit_games += 1,
            GameEndReason::Stalled(_) => stalled_games += 1,
        }
    }

    Ok(TournamentReport {
        games,
        seat_wins,
        turn_limit_games,
        stalled_games,
        elapsed: start.elapsed(),
    })
}
