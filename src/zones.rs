//! Shared card piles (draw pile, discard pile)

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// Shared zones that are not owned by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    DrawPile,
    DiscardPile,
}

/// An ordered pile of cards; the top is the end of the vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,

    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // remove() rather than swap_remove(): pile order is part of the
            // deterministic replay of a seeded game
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Uniform Fisher-Yates shuffle
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Remove and return every card, bottom first
    pub fn take_all(&mut self) -> Vec<CardId> {
        std::mem::take(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_card_zone() {
        let mut zone = CardZone::new(Zone::DiscardPile);
        assert!(zone.is_empty());

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);
        zone.add(card1);
        zone.add(card2);

        assert_eq!(zone.len(), 2);
        assert!(zone.contains(card1));
        assert!(zone.remove(card1));
        assert!(!zone.contains(card1));
        assert!(!zone.remove(card1));
    }

    #[test]
    fn test_draw_from_top() {
        let mut pile = CardZone::new(Zone::DrawPile);
        let ids: Vec<_> = (0..3).map(CardId::new).collect();
        for &id in &ids {
            pile.add(id);
        }

        assert_eq!(pile.peek_top(), Some(ids[2]));
        assert_eq!(pile.draw_top(), Some(ids[2]));
        assert_eq!(pile.draw_top(), Some(ids[1]));
        assert_eq!(pile.draw_top(), Some(ids[0]));
        assert_eq!(pile.draw_top(), None);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a = CardZone::new(Zone::DrawPile);
        let mut b = CardZone::new(Zone::DrawPile);
        for i in 0..20 {
            a.add(CardId::new(i));
            b.add(CardId::new(i));
        }
        a.shuffle(&mut ChaCha12Rng::seed_from_u64(7));
        b.shuffle(&mut ChaCha12Rng::seed_from_u64(7));
        assert_eq!(a.cards, b.cards);

        let mut sorted = a.take_all();
        sorted.sort();
        assert_eq!(sorted, (0..20).map(CardId::new).collect::<Vec<_>>());
        assert!(a.is_empty());
    }
}
