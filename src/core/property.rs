//! Property sets: per-color groupings of a player's property cards

use crate::core::{CardId, Color};
use serde::{Deserialize, Serialize};

/// Rent surcharge for a house on a complete set
pub const HOUSE_RENT: u32 = 3;
/// Rent surcharge for a hotel on a complete set
pub const HOTEL_RENT: u32 = 4;

/// House or hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    House,
    Hotel,
}

/// A per-color group of property cards owned by one player
///
/// Modifiers are stored as the card that created them, so the house and
/// hotel cards stay accounted for while they sit on the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    pub color: Color,

    /// Property cards in placement order (wildcards included)
    pub cards: Vec<CardId>,

    pub house: Option<CardId>,

    pub hotel: Option<CardId>,

    /// Cached completeness, refreshed by `recompute`
    pub is_complete: bool,
}

impl PropertySet {
    pub fn new(color: Color) -> Self {
        PropertySet {
            color,
            cards: Vec::new(),
            house: None,
            hotel: None,
            is_complete: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn recompute(&mut self) {
        self.is_complete = self.cards.len() >= self.color.set_size();
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
        self.recompute();
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            self.cards.remove(pos);
            self.recompute();
            true
        } else {
            false
        }
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::House => self.house.is_some(),
            Modifier::Hotel => self.hotel.is_some(),
        }
    }

    /// Why `modifier` cannot be added right now, if it cannot
    pub fn modifier_blocker(&self, modifier: Modifier) -> Option<&'static str> {
        if !self.is_complete {
            return Some("set is not complete");
        }
        match modifier {
            Modifier::House if self.house.is_some() => Some("set already has a house"),
            Modifier::Hotel if self.hotel.is_some() => Some("set already has a hotel"),
            Modifier::Hotel if self.house.is_none() => Some("a hotel needs a house first"),
            _ => None,
        }
    }

    /// Attach a modifier card; callers validate with `modifier_blocker` first
    pub fn attach(&mut self, modifier: Modifier, card_id: CardId) {
        match modifier {
            Modifier::House => self.house = Some(card_id),
            Modifier::Hotel => self.hotel = Some(card_id),
        }
    }

    /// Detach both modifiers, returning their cards
    pub fn take_modifiers(&mut self) -> Vec<CardId> {
        self.house.take().into_iter().chain(self.hotel.take()).collect()
    }

    /// Rent charged for this set, surcharges included
    pub fn rent(&self) -> u32 {
        let mut rent = self.color.base_rent(self.cards.len());
        if self.house.is_some() {
            rent += HOUSE_RENT;
        }
        if self.hotel.is_some() {
            rent += HOTEL_RENT;
        }
        rent
    }

    /// Every card held by this set, modifiers included
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied().chain(self.house).chain(self.hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(color: Color, count: u32) -> PropertySet {
        let mut set = PropertySet::new(color);
        for i in 0..count {
            set.add(CardId::new(i));
        }
        set
    }

    #[test]
    fn test_completeness() {
        let mut set = set_with(Color::Brown, 1);
        assert!(!set.is_complete);
        set.add(CardId::new(10));
        assert!(set.is_complete);
        assert!(set.remove(CardId::new(10)));
        assert!(!set.is_complete);
        assert!(!set.remove(CardId::new(10)));
    }

    #[test]
    fn test_rent_first_entry_for_single_card() {
        let set = set_with(Color::Green, 1);
        assert_eq!(set.rent(), 2);
    }

    #[test]
    fn test_rent_with_house_and_hotel() {
        let mut set = set_with(Color::DarkBlue, 2);
        assert_eq!(set.modifier_blocker(Modifier::Hotel), Some("a hotel needs a house first"));
        assert_eq!(set.modifier_blocker(Modifier::House), None);
        set.attach(Modifier::House, CardId::new(50));
        assert_eq!(set.modifier_blocker(Modifier::House), Some("set already has a house"));
        set.attach(Modifier::Hotel, CardId::new(51));
        assert_eq!(set.rent(), 8 + HOUSE_RENT + HOTEL_RENT);
        assert_eq!(set.all_cards().count(), 4);
    }

    #[test]
    fn test_modifier_needs_complete_set() {
        let set = set_with(Color::Railroad, 3);
        assert_eq!(set.modifier_blocker(Modifier::House), Some("set is not complete"));
    }

    #[test]
    fn test_take_modifiers() {
        let mut set = set_with(Color::Utility, 2);
        set.attach(Modifier::House, CardId::new(60));
        assert_eq!(set.take_modifiers(), vec![CardId::new(60)]);
        assert!(set.house.is_none());
    }
}
