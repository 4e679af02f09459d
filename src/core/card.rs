//! Card types and definitions

use crate::core::{CardId, CardName, Color, GameEntity};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Kinds of action card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Draw two extra cards
    DrawTwo,
    /// Every other player pays a fixed amount
    CollectFromAll,
    /// One chosen player pays a fixed amount
    CollectFromOne,
    /// Take one property from an opponent
    StealOneProperty,
    /// Trade one of your properties for one of an opponent's
    SwapProperties,
    /// Take a complete set from an opponent
    StealCompleteSet,
    AddHouse,
    AddHotel,
    /// Doubles a rent card played alongside it
    DoubleRent,
    /// Cancels an action aimed at you
    RefuseAction,
}

impl ActionKind {
    pub const ALL: [ActionKind; 10] = [
        ActionKind::DrawTwo,
        ActionKind::CollectFromAll,
        ActionKind::CollectFromOne,
        ActionKind::StealOneProperty,
        ActionKind::SwapProperties,
        ActionKind::StealCompleteSet,
        ActionKind::AddHouse,
        ActionKind::AddHotel,
        ActionKind::DoubleRent,
        ActionKind::RefuseAction,
    ];

    /// Only playable as part of another play or a response
    pub fn is_companion(&self) -> bool {
        matches!(self, ActionKind::DoubleRent | ActionKind::RefuseAction)
    }
}

/// Per-variant payload of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Property {
        /// Printed color (for wildcards, the first legal color)
        color: Color,
        wildcard: bool,
        /// Colors a wildcard may occupy; a plain property lists only its own color
        allowed: SmallVec<[Color; 2]>,
    },
    Money,
    Action(ActionKind),
    Rent {
        colors: SmallVec<[Color; 2]>,
        /// Wild rent: any one color, charged to one opponent
        wild: bool,
    },
}

/// Represents a card in the game
///
/// Cards are immutable after the catalog is built; only their location
/// changes during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: CardId,

    pub name: CardName,

    /// Face value in millions, used for banking and payment
    pub value: u32,

    pub kind: CardKind,
}

impl Card {
    pub fn property(id: CardId, name: impl Into<CardName>, color: Color) -> Self {
        Card {
            id,
            name: name.into(),
            value: color.property_value(),
            kind: CardKind::Property {
                color,
                wildcard: false,
                allowed: SmallVec::from_slice(&[color]),
            },
        }
    }

    pub fn wildcard(id: CardId, name: impl Into<CardName>, value: u32, allowed: &[Color]) -> Self {
        Card {
            id,
            name: name.into(),
            value,
            kind: CardKind::Property {
                color: allowed[0],
                wildcard: true,
                allowed: SmallVec::from_slice(allowed),
            },
        }
    }

    pub fn money(id: CardId, value: u32) -> Self {
        Card {
            id,
            name: CardName::new(format!("{value}M")),
            value,
            kind: CardKind::Money,
        }
    }

    pub fn action(id: CardId, name: impl Into<CardName>, value: u32, kind: ActionKind) -> Self {
        Card {
            id,
            name: name.into(),
            value,
            kind: CardKind::Action(kind),
        }
    }

    pub fn rent(id: CardId, name: impl Into<CardName>, value: u32, colors: &[Color], wild: bool) -> Self {
        Card {
            id,
            name: name.into(),
            value,
            kind: CardKind::Rent {
                colors: SmallVec::from_slice(colors),
                wild,
            },
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, CardKind::Property { .. })
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, CardKind::Property { wildcard: true, .. })
    }

    pub fn is_money(&self) -> bool {
        matches!(self.kind, CardKind::Money)
    }

    pub fn action_kind(&self) -> Option<ActionKind> {
        match self.kind {
            CardKind::Action(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_action(&self, kind: ActionKind) -> bool {
        self.action_kind() == Some(kind)
    }

    /// Can this property card sit in a set of `color`?
    pub fn can_occupy(&self, color: Color) -> bool {
        match &self.kind {
            CardKind::Property { allowed, .. } => allowed.contains(&color),
            _ => false,
        }
    }

    /// Can this rent card charge for `color`?
    pub fn charges_for(&self, color: Color) -> bool {
        match &self.kind {
            CardKind::Rent { colors, .. } => colors.contains(&color),
            _ => false,
        }
    }
}

impl GameEntity<Card> for Card {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_card() {
        let card = Card::property(CardId::new(1), "Boardwalk", Color::DarkBlue);
        assert_eq!(card.value, 4);
        assert!(card.is_property());
        assert!(!card.is_wildcard());
        assert!(card.can_occupy(Color::DarkBlue));
        assert!(!card.can_occupy(Color::Green));
    }

    #[test]
    fn test_wildcard_restrictions() {
        let card = Card::wildcard(CardId::new(2), "Wild", 4, &[Color::DarkBlue, Color::Green]);
        assert!(card.is_wildcard());
        assert!(card.can_occupy(Color::Green));
        assert!(!card.can_occupy(Color::Red));
    }

    #[test]
    fn test_companion_actions() {
        assert!(ActionKind::DoubleRent.is_companion());
        assert!(ActionKind::RefuseAction.is_companion());
        assert!(!ActionKind::StealCompleteSet.is_companion());
    }

    #[test]
    fn test_rent_colors() {
        let card = Card::rent(CardId::new(3), "Rent", 1, &[Color::Red, Color::Yellow], false);
        assert!(card.charges_for(Color::Red));
        assert!(!card.charges_for(Color::Pink));
        assert!(!card.is_property());
    }
}
