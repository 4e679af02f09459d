//! Core game state, turn structure and the pending-action protocol

pub mod actions;
pub mod controller;
pub mod game_loop;
pub mod logger;
pub mod payment;
pub mod pending;
pub mod phase;
pub mod random_controller;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod victory;
pub mod view;
pub mod zero_controller;

pub use actions::PlayTarget;
pub use controller::{Intent, PlayerController};
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel};
pub use logger::{GameLogger, LogEntry, OutputMode};
pub use payment::{suggest_payment, validate_payment};
pub use pending::{ActionResponse, PendingAction, PendingKind, Reply};
pub use phase::{MatchPhase, TurnPhase, TurnStructure};
pub use random_controller::RandomController;
pub use rules::{RuleSet, MAX_PARTICIPANTS};
pub use snapshot::{GameSnapshot, JsonDirStore, MemoryStore, SnapshotStore};
pub use state::GameState;
pub use view::{GameView, PlayerView};
pub use zero_controller::ZeroController;
