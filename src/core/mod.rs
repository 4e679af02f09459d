//! Core game types and entities

pub mod card;
pub mod color;
pub mod entity;
pub mod player;
pub mod property;
pub mod types;

pub use card::{ActionKind, Card, CardKind};
pub use color::Color;
pub use entity::{EntityId, EntityStore, GameEntity};
pub use player::Player;
pub use property::{Modifier, PropertySet, HOTEL_RENT, HOUSE_RENT};
pub use types::{CardName, PlayerName, RoomId, SessionHandle};

/// Card ID type
pub type CardId = EntityId<Card>;

/// Player ID type
pub type PlayerId = EntityId<Player>;

/// The fixed set of cards a match is played with, by ID
pub type CardCatalog = EntityStore<Card>;
