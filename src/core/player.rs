//! Player representation and property ledger

use crate::core::{
    ActionKind, Card, CardCatalog, CardId, Color, GameEntity, Modifier, PlayerId, PlayerName,
    PropertySet, SessionHandle,
};
use crate::{DealError, Result};
use serde::{Deserialize, Serialize};

/// Represents a participant in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Transport handle, opaque to the engine
    pub session: Option<SessionHandle>,

    pub connected: bool,

    /// Cards in hand (order is kept for display only)
    pub hand: Vec<CardId>,

    /// Banked money-valued cards
    pub bank: Vec<CardId>,

    /// Property sets, at most one per color
    pub sets: Vec<PropertySet>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, session: Option<SessionHandle>) -> Self {
        Player {
            id,
            name: name.into(),
            session,
            connected: true,
            hand: Vec::new(),
            bank: Vec::new(),
            sets: Vec::new(),
        }
    }

    // ---- hand -------------------------------------------------------------

    pub fn holds(&self, card_id: CardId) -> bool {
        self.hand.contains(&card_id)
    }

    pub fn remove_from_hand(&mut self, card_id: CardId) -> Result<()> {
        let pos = self
            .hand
            .iter()
            .position(|&id| id == card_id)
            .ok_or_else(|| DealError::card_not_found(card_id, format!("hand of player {}", self.id)))?;
        self.hand.remove(pos);
        Ok(())
    }

    /// First card of the given action kind in hand, if any
    pub fn find_action(&self, catalog: &CardCatalog, kind: ActionKind) -> Option<CardId> {
        self.hand
            .iter()
            .copied()
            .find(|&id| catalog.get(id).map(|c| c.is_action(kind)).unwrap_or(false))
    }

    pub fn has_refusal(&self, catalog: &CardCatalog) -> bool {
        self.find_action(catalog, ActionKind::RefuseAction).is_some()
    }

    // ---- bank -------------------------------------------------------------

    pub fn in_bank(&self, card_id: CardId) -> bool {
        self.bank.contains(&card_id)
    }

    pub fn remove_from_bank(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.bank.iter().position(|&id| id == card_id) {
            self.bank.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn bank_value(&self, catalog: &CardCatalog) -> u32 {
        self.bank
            .iter()
            .filter_map(|&id| catalog.get(id).ok())
            .map(|c| c.value)
            .sum()
    }

    // ---- property ledger --------------------------------------------------

    pub fn set(&self, color: Color) -> Option<&PropertySet> {
        self.sets.iter().find(|s| s.color == color)
    }

    fn set_mut(&mut self, color: Color) -> Option<&mut PropertySet> {
        self.sets.iter_mut().find(|s| s.color == color)
    }

    fn set_or_create(&mut self, color: Color) -> &mut PropertySet {
        let idx = match self.sets.iter().position(|s| s.color == color) {
            Some(idx) => idx,
            None => {
                self.sets.push(PropertySet::new(color));
                self.sets.len() - 1
            }
        };
        &mut self.sets[idx]
    }

    /// Color of the set currently holding `card_id`
    pub fn property_color(&self, card_id: CardId) -> Option<Color> {
        self.sets.iter().find(|s| s.contains(card_id)).map(|s| s.color)
    }

    /// Check that `card` may be placed as `color` without placing it
    pub fn check_placement(card: &Card, color: Color) -> Result<()> {
        if !card.is_property() {
            return Err(DealError::CardMisuse(format!("{} is not a property", card.name)));
        }
        if !card.can_occupy(color) {
            return Err(DealError::IllegalWildcardColor { card: card.id, color });
        }
        Ok(())
    }

    /// Place a property card into the set of `color`, creating the set if needed
    pub fn place_property(&mut self, card: &Card, color: Color) -> Result<()> {
        Self::check_placement(card, color)?;
        self.set_or_create(color).add(card.id);
        Ok(())
    }

    /// Place without the legality check; used when a card changes owner but
    /// keeps the color it already occupied
    pub(crate) fn place_unchecked(&mut self, card_id: CardId, color: Color) {
        self.set_or_create(color).add(card_id);
    }

    /// Remove a property card from whichever set holds it
    ///
    /// Returns the color it was taken from. A set left empty is pruned and
    /// any house or hotel on it drops into the bank.
    pub fn take_property(&mut self, card_id: CardId) -> Option<Color> {
        let color = self.property_color(card_id)?;
        if let Some(set) = self.set_mut(color) {
            set.remove(card_id);
        }
        self.prune_empty_sets();
        Some(color)
    }

    fn prune_empty_sets(&mut self) {
        let mut orphaned = Vec::new();
        self.sets.retain_mut(|set| {
            if set.is_empty() {
                orphaned.extend(set.take_modifiers());
                false
            } else {
                true
            }
        });
        self.bank.extend(orphaned);
    }

    /// Move a wildcard between two of this player's sets
    pub fn relocate_wildcard(&mut self, card: &Card, from: Color, to: Color) -> Result<()> {
        if !card.is_wildcard() {
            return Err(DealError::CardMisuse(format!("{} is not a wildcard", card.name)));
        }
        if from == to {
            return Err(DealError::InvalidTarget("wildcard is already in that set".to_string()));
        }
        let in_source = self.set(from).map(|s| s.contains(card.id)).unwrap_or(false);
        if !in_source {
            return Err(DealError::card_not_found(card.id, format!("{from} set of player {}", self.id)));
        }
        Self::check_placement(card, to)?;

        self.take_property(card.id);
        self.place_unchecked(card.id, to);
        Ok(())
    }

    /// Attach a house or hotel card to a complete set
    pub fn add_modifier(&mut self, color: Color, modifier: Modifier, card_id: CardId) -> Result<()> {
        self.check_modifier(color, modifier)?;
        if let Some(set) = self.set_mut(color) {
            set.attach(modifier, card_id);
        }
        Ok(())
    }

    pub fn check_modifier(&self, color: Color, modifier: Modifier) -> Result<()> {
        let set = self.set(color).ok_or(DealError::SetNotFound { player: self.id, color })?;
        if !set.is_complete {
            return Err(DealError::IncompleteSet(color));
        }
        match set.modifier_blocker(modifier) {
            Some(reason) => Err(DealError::InvalidModifier(reason.to_string())),
            None => Ok(()),
        }
    }

    /// Detach a whole set (modifiers included)
    pub fn take_set(&mut self, color: Color) -> Option<PropertySet> {
        let pos = self.sets.iter().position(|s| s.color == color)?;
        Some(self.sets.remove(pos))
    }

    /// Receive a whole set, merging into an existing set of the same color
    ///
    /// When both sets carry the same modifier, the incoming duplicate goes to
    /// the bank.
    pub fn receive_set(&mut self, mut incoming: PropertySet) {
        let Some(idx) = self.sets.iter().position(|s| s.color == incoming.color) else {
            incoming.recompute();
            self.sets.push(incoming);
            return;
        };

        let existing = &mut self.sets[idx];
        existing.cards.append(&mut incoming.cards);
        let mut spill = Vec::new();
        for (slot, extra) in [
            (&mut existing.house, incoming.house),
            (&mut existing.hotel, incoming.hotel),
        ] {
            match (slot.is_some(), extra) {
                (false, Some(card)) => *slot = Some(card),
                (true, Some(card)) => spill.push(card),
                _ => {}
            }
        }
        existing.recompute();
        self.bank.extend(spill);
    }

    pub fn complete_set_count(&self) -> usize {
        self.sets.iter().filter(|s| s.is_complete).count()
    }

    pub fn property_value(&self, catalog: &CardCatalog) -> u32 {
        self.sets
            .iter()
            .flat_map(|s| s.cards.iter())
            .filter_map(|&id| catalog.get(id).ok())
            .map(|c| c.value)
            .sum()
    }

    /// Total value available for paying debts: bank plus all properties
    pub fn liquid_value(&self, catalog: &CardCatalog) -> u32 {
        self.bank_value(catalog) + self.property_value(catalog)
    }

    /// Rent this player can charge for `color`
    pub fn rent_for(&self, color: Color) -> u32 {
        self.set(color).map(|s| s.rent()).unwrap_or(0)
    }

    /// Every card this player has on the table or in hand
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hand
            .iter()
            .copied()
            .chain(self.bank.iter().copied())
            .chain(self.sets.iter().flat_map(|s| s.all_cards()))
    }
}

impl GameEntity<Player> for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(cards: Vec<Card>) -> CardCatalog {
        let mut catalog = CardCatalog::new();
        for card in cards {
            catalog.insert(card.id, card);
        }
        catalog
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new(PlayerId::new(1), "Alice", None);
        assert_eq!(player.name.as_str(), "Alice");
        assert!(player.connected);
        assert!(player.sets.is_empty());
    }

    #[test]
    fn test_place_creates_set_and_completes() {
        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        let a = Card::property(CardId::new(1), "Mediterranean", Color::Brown);
        let b = Card::property(CardId::new(2), "Baltic", Color::Brown);

        player.place_property(&a, Color::Brown).unwrap();
        assert!(!player.set(Color::Brown).unwrap().is_complete);
        player.place_property(&b, Color::Brown).unwrap();
        assert!(player.set(Color::Brown).unwrap().is_complete);
        assert_eq!(player.complete_set_count(), 1);
    }

    #[test]
    fn test_place_rejects_wrong_color() {
        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        let wild = Card::wildcard(CardId::new(3), "Wild", 4, &[Color::DarkBlue, Color::Green]);
        let err = player.place_property(&wild, Color::Red).unwrap_err();
        assert!(matches!(err, DealError::IllegalWildcardColor { .. }));
        assert!(player.sets.is_empty());
    }

    #[test]
    fn test_relocate_wildcard_prunes_source() {
        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        let wild = Card::wildcard(CardId::new(3), "Wild", 4, &[Color::DarkBlue, Color::Green]);
        let boardwalk = Card::property(CardId::new(4), "Boardwalk", Color::DarkBlue);

        player.place_property(&wild, Color::Green).unwrap();
        player.place_property(&boardwalk, Color::DarkBlue).unwrap();
        player.relocate_wildcard(&wild, Color::Green, Color::DarkBlue).unwrap();

        assert!(player.set(Color::Green).is_none());
        assert!(player.set(Color::DarkBlue).unwrap().is_complete);
    }

    #[test]
    fn test_relocate_rejects_plain_property() {
        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        let boardwalk = Card::property(CardId::new(4), "Boardwalk", Color::DarkBlue);
        player.place_property(&boardwalk, Color::DarkBlue).unwrap();
        assert!(player
            .relocate_wildcard(&boardwalk, Color::DarkBlue, Color::Green)
            .is_err());
    }

    #[test]
    fn test_pruned_set_drops_modifiers_into_bank() {
        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        let a = Card::property(CardId::new(1), "Electric Company", Color::Utility);
        let b = Card::property(CardId::new(2), "Water Works", Color::Utility);
        player.place_property(&a, Color::Utility).unwrap();
        player.place_property(&b, Color::Utility).unwrap();
        player.add_modifier(Color::Utility, Modifier::House, CardId::new(9)).unwrap();

        player.take_property(a.id);
        player.take_property(b.id);
        assert!(player.sets.is_empty());
        assert_eq!(player.bank, vec![CardId::new(9)]);
    }

    #[test]
    fn test_liquid_value() {
        let money = Card::money(CardId::new(1), 5);
        let prop = Card::property(CardId::new(2), "Boardwalk", Color::DarkBlue);
        let catalog = catalog_with(vec![money.clone(), prop.clone()]);

        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        player.bank.push(money.id);
        player.place_property(&prop, Color::DarkBlue).unwrap();
        assert_eq!(player.liquid_value(&catalog), 9);
    }

    #[test]
    fn test_receive_set_merges() {
        let mut player = Player::new(PlayerId::new(1), "Alice", None);
        let a = Card::property(CardId::new(1), "Reading Railroad", Color::Railroad);
        player.place_property(&a, Color::Railroad).unwrap();

        let mut incoming = PropertySet::new(Color::Railroad);
        for i in 10..13 {
            incoming.add(CardId::new(i));
        }
        player.receive_set(incoming);
        let set = player.set(Color::Railroad).unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.is_complete);
    }
}
