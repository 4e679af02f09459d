//! Game loop implementation
//!
//! Drives one match by asking the controller of whichever participant the
//! engine is waiting on for an intent, until someone wins or a limit hits.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating all format! allocations that are a major performance bottleneck.
macro_rules! log_if_verbose {
    ($self:expr, $level:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            if $level <= $self.logger.verbosity() || $self.logger.is_capturing() {
                $self.logger.game_event($level, &format!($($arg)*));
            }
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
            let _ = $level;
        }
    };
}

use crate::action_log::GameEvent;
use crate::core::{CardId, PlayerId};
use crate::game::controller::{Intent, PlayerController};
use crate::game::{GameLogger, GameState, MatchPhase};
use crate::{DealError, Result};
use std::fmt;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns and key plays (default)
    #[default]
    Normal = 2,
    /// Verbose - every event and controller choice
    Verbose = 3,
}

/// Result of running a game to completion
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Winner of the game (None if a limit was hit)
    pub winner: Option<PlayerId>,
    /// Turn number the game stopped on
    pub turns_played: u32,
    pub end_reason: GameEndReason,
}

/// Reason the game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEndReason {
    /// A participant completed enough sets
    Winner(PlayerId),
    /// Game reached maximum turn limit
    TurnLimit,
    /// The awaited participant had nothing legal to do, or one turn ran
    /// past the step limit
    Stalled(PlayerId),
}

impl fmt::Display for GameEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEndReason::Winner(id) => write!(f, "player {id} won"),
            GameEndReason::TurnLimit => write!(f, "turn limit reached"),
            GameEndReason::Stalled(id) => write!(f, "stalled waiting on player {id}"),
        }
    }
}

/// Game loop manager
pub struct GameLoop<'a> {
    pub game: &'a mut GameState,
    /// Maximum turns before stopping without a winner
    pub max_turns: u32,
    /// Maximum intents within a single turn
    pub max_steps_per_turn: u32,
    pub logger: GameLogger,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState) -> Self {
        GameLoop {
            game,
            max_turns: 1000,
            max_steps_per_turn: 500,
            logger: GameLogger::new(),
        }
    }

    /// Set maximum turns before stopping
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set verbosity level for output
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    /// Use a preconfigured logger (e.g. one capturing to memory)
    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Run the game with one controller per participant
    ///
    /// Starts the match if it is still waiting. Controllers are matched to
    /// participants by ID, in any order.
    pub fn run_game(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<GameResult> {
        self.setup_game(controllers)?;

        let mut steps_this_turn = 0;
        let mut turn_seen = self.game.turn.turn_number;
        let result = loop {
            if let Some(result) = self.check_end() {
                break result;
            }
            if self.game.turn.turn_number != turn_seen {
                turn_seen = self.game.turn.turn_number;
                steps_this_turn = 0;
            }

            let Some(actor) = self.game.awaiting_player() else {
                return Err(DealError::WrongMatchPhase {
                    expected: MatchPhase::Playing,
                    actual: self.game.match_phase,
                });
            };
            steps_this_turn += 1;
            if steps_this_turn > self.max_steps_per_turn {
                break self.stalled(actor);
            }

            let legal = self.game.legal_intents(actor);
            let view = self.game.view_for(actor)?;
            let controller = Self::controller_for(controllers, actor)?;
            let intent = controller
                .choose_intent(&view, &legal)
                .or_else(|| fallback(&legal));
            let Some(intent) = intent else {
                break self.stalled(actor);
            };

            #[cfg(feature = "verbose-logging")]
            self.logger.controller_choice(controller.name(), &intent.to_string());

            self.game.apply(actor, intent)?;
            self.render_events();
        };

        self.log_outcome(&result);
        for controller in controllers.iter_mut() {
            let id = controller.player_id();
            let view = self.game.view_for(id)?;
            controller.on_game_end(&view, result.winner == Some(id));
        }
        Ok(result)
    }

    fn setup_game(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<()> {
        for player in &self.game.players {
            Self::controller_for(controllers, player.id)?;
        }
        if self.game.match_phase == MatchPhase::Waiting {
            self.game.start_match()?;
            self.render_events();
        }
        Ok(())
    }

    fn controller_for<'c>(
        controllers: &'c mut [Box<dyn PlayerController>],
        id: PlayerId,
    ) -> Result<&'c mut Box<dyn PlayerController>> {
        controllers
            .iter_mut()
            .find(|c| c.player_id() == id)
            .ok_or(DealError::UnknownParticipant(id))
    }

    fn check_end(&self) -> Option<GameResult> {
        if let Some(winner) = self.game.winner {
            return Some(GameResult {
                winner: Some(winner),
                turns_played: self.game.turn.turn_number,
                end_reason: GameEndReason::Winner(winner),
            });
        }
        if self.game.turn.turn_number > self.max_turns {
            return Some(GameResult {
                winner: None,
                turns_played: self.max_turns,
                end_reason: GameEndReason::TurnLimit,
            });
        }
        None
    }

    fn stalled(&self, actor: PlayerId) -> GameResult {
        GameResult {
            winner: None,
            turns_played: self.game.turn.turn_number,
            end_reason: GameEndReason::Stalled(actor),
        }
    }

    fn log_outcome(&self, result: &GameResult) {
        let text = match result.winner {
            Some(id) => format!(
                "{} wins on turn {}",
                self.player_name(id),
                result.turns_played
            ),
            None => format!("No winner: {}", result.end_reason),
        };
        self.logger.minimal(&text);
    }

    /// Drain the engine's events and log them as text
    fn render_events(&mut self) {
        for event in self.game.log.drain() {
            self.render_event(&event);
        }
    }

    fn player_name(&self, id: PlayerId) -> String {
        self.game
            .get_player(id)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|_| format!("player {id}"))
    }

    fn card_name(&self, id: CardId) -> String {
        self.game
            .cards
            .get(id)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|_| format!("card {id}"))
    }

    #[allow(unused_variables)]
    fn render_event(&self, event: &GameEvent) {
        use VerbosityLevel::{Normal, Verbose};
        match event {
            GameEvent::MatchStarted { players } => {
                log_if_verbose!(self, Normal, "Match started with {} players", players.len());
            }
            GameEvent::CardsDrawn {
                player_id,
                count,
                reshuffled,
            } => {
                if *reshuffled {
                    log_if_verbose!(self, Verbose, "Discard pile reshuffled into the draw pile");
                }
                log_if_verbose!(self, Verbose, "{} draws {count}", self.player_name(*player_id));
            }
            GameEvent::CardBanked { player_id, card_id } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} banks {}",
                    self.player_name(*player_id),
                    self.card_name(*card_id)
                );
            }
            GameEvent::PropertyPlaced {
                player_id,
                card_id,
                color,
            } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} places {} as {color}",
                    self.player_name(*player_id),
                    self.card_name(*card_id)
                );
            }
            GameEvent::ActionPlayed { player_id, card_id, .. } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} plays {}",
                    self.player_name(*player_id),
                    self.card_name(*card_id)
                );
            }
            GameEvent::RentCharged {
                player_id,
                color,
                amount,
                doubled,
                ..
            } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} charges {amount}M rent on {color}{}",
                    self.player_name(*player_id),
                    if *doubled { " (doubled)" } else { "" }
                );
            }
            GameEvent::PendingOpened { kind, target, .. } => match target {
                Some(t) => {
                    log_if_verbose!(self, Verbose, "{kind:?} awaits {}", self.player_name(*t));
                }
                None => {
                    log_if_verbose!(self, Verbose, "{kind:?} awaits every opponent");
                }
            },
            GameEvent::ActionRefused { player_id, .. } => {
                log_if_verbose!(self, Normal, "{} says no", self.player_name(*player_id));
            }
            GameEvent::RolesSwapped { awaiting } => {
                log_if_verbose!(self, Verbose, "Now waiting on {}", self.player_name(*awaiting));
            }
            GameEvent::PaymentMade { from, to, value, .. } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} pays {value}M to {}",
                    self.player_name(*from),
                    self.player_name(*to)
                );
            }
            GameEvent::PropertyTransferred {
                from,
                to,
                card_id,
                ..
            } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} moves from {} to {}",
                    self.card_name(*card_id),
                    self.player_name(*from),
                    self.player_name(*to)
                );
            }
            GameEvent::SetTransferred { from, to, color } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} takes the {color} set from {}",
                    self.player_name(*to),
                    self.player_name(*from)
                );
            }
            GameEvent::ModifierAdded {
                player_id,
                color,
                modifier,
            } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "{} adds a {modifier:?} to {color}",
                    self.player_name(*player_id)
                );
            }
            GameEvent::WildcardMoved {
                player_id,
                card_id,
                from,
                to,
            } => {
                log_if_verbose!(
                    self,
                    Verbose,
                    "{} moves {} from {from} to {to}",
                    self.player_name(*player_id),
                    self.card_name(*card_id)
                );
            }
            GameEvent::PendingResolved { kind, cancelled } => {
                log_if_verbose!(
                    self,
                    Verbose,
                    "{kind:?} {}",
                    if *cancelled { "cancelled" } else { "resolved" }
                );
            }
            GameEvent::CardsDiscarded { player_id, cards } => {
                log_if_verbose!(
                    self,
                    Verbose,
                    "{} discards {} card(s)",
                    self.player_name(*player_id),
                    cards.len()
                );
            }
            GameEvent::TurnPassed {
                to_player,
                turn_number,
                ..
            } => {
                log_if_verbose!(
                    self,
                    Normal,
                    "Turn {turn_number}: {}",
                    self.player_name(*to_player)
                );
            }
            GameEvent::MatchWon { player_id } => {
                log_if_verbose!(self, Normal, "{} completes a winning set", self.player_name(*player_id));
            }
        }
    }
}

/// Used when a controller declines to choose: end the turn if possible,
/// otherwise take the first legal intent
fn fallback(legal: &[Intent]) -> Option<Intent> {
    legal
        .iter()
        .find(|i| **i == Intent::EndTurn)
        .or_else(|| legal.first())
        .cloned()
}
