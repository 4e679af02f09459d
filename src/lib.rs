//! Property Deal - rules engine for a property-trading card game
//!
//! The engine owns one match at a time as a `GameState`: the fixed card
//! catalog, every participant's hand, bank and property sets, the turn
//! state machine and the single pending action that opponents answer.
//! Transport, sessions and persistence belong to the caller.

pub mod action_log;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{DealError, ErrorKind, Result};
