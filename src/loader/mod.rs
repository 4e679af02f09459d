//! Card catalog and match setup

pub mod deck;
pub mod game_init;

pub use deck::{CardTemplate, DeckEntry, DeckList, CATALOG_SIZE};
pub use game_init::GameInitializer;
