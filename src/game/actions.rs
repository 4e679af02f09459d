//! Turn operations: draw, play, discard, rearrange, end turn
//!
//! Every operation validates completely before touching state, so a
//! rejected call leaves the game exactly as it was.

use crate::action_log::GameEvent;
use crate::core::{ActionKind, Card, CardId, CardKind, Color, Modifier, Player, PlayerId};
use crate::game::{GameState, PendingAction, PendingKind, TurnPhase};
use crate::{DealError, Result};
use serde::{Deserialize, Serialize};

/// What a played card is aimed at
///
/// Each action kind has its own shape, so a steal can never be sent
/// without a color and a rent can never name a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayTarget {
    /// Draw-two and collect-from-all
    None,
    /// Put any non-property card in the bank for its face value
    Bank,
    /// Lay a property card as `color`
    Property { color: Color },
    /// Collect-from-one
    Player { target: PlayerId },
    StealOne { target: PlayerId, color: Color },
    Swap {
        target: PlayerId,
        target_color: Color,
        own_color: Color,
        own_card: CardId,
    },
    StealSet { target: PlayerId, color: Color },
    /// House or hotel onto one of the actor's complete sets
    Upgrade { color: Color },
    /// `target` is required for wild rent and forbidden for fixed rent
    Rent {
        color: Color,
        target: Option<PlayerId>,
        doubler: Option<CardId>,
    },
}

impl GameState {
    /// Draw at the start of a turn: five cards from an empty hand, else two
    pub fn draw(&mut self, actor: PlayerId) -> Result<usize> {
        let idx = self.ensure_actor_turn(actor)?;
        self.expect_turn_phase(self.turn.phase == TurnPhase::Draw)?;

        let count = if self.players[idx].hand.is_empty() {
            self.rules.empty_hand_draw
        } else {
            self.rules.draw_per_turn
        };
        let (drawn, reshuffled) = self.draw_into_hand(idx, count);
        self.turn.phase = TurnPhase::Action;
        self.log.log(GameEvent::CardsDrawn {
            player_id: actor,
            count: drawn,
            reshuffled,
        });
        Ok(drawn)
    }

    /// Play a card from hand, spending from the turn's action budget
    pub fn play_card(&mut self, actor: PlayerId, card_id: CardId, target: PlayTarget) -> Result<()> {
        let idx = self.ensure_actor_turn(actor)?;
        self.expect_turn_phase(self.turn.phase == TurnPhase::Action && !self.turn.budget_exhausted())?;
        if !self.players[idx].holds(card_id) {
            return Err(DealError::card_not_found(card_id, format!("hand of player {actor}")));
        }
        let card = self.cards.get(card_id)?.clone();

        if target == PlayTarget::Bank {
            return self.bank_card(idx, &card);
        }

        match (&card.kind, target) {
            (CardKind::Money, PlayTarget::None) => self.bank_card(idx, &card),
            (CardKind::Property { .. }, PlayTarget::Property { color }) => {
                self.place_from_hand(idx, &card, color)
            }
            (CardKind::Action(kind), target) => self.play_action(idx, &card, *kind, target),
            (CardKind::Rent { wild, .. }, PlayTarget::Rent { color, target, doubler }) => {
                self.play_rent(idx, &card, *wild, color, target, doubler)
            }
            _ => Err(DealError::CardMisuse(format!(
                "{} cannot be played that way",
                card.name
            ))),
        }
    }

    fn bank_card(&mut self, idx: usize, card: &Card) -> Result<()> {
        if card.is_property() {
            return Err(DealError::CardMisuse(format!(
                "{} is a property and cannot be banked",
                card.name
            )));
        }
        let player = &mut self.players[idx];
        player.remove_from_hand(card.id)?;
        player.bank.push(card.id);
        self.log.log(GameEvent::CardBanked {
            player_id: player.id,
            card_id: card.id,
        });
        self.finish_play(1);
        Ok(())
    }

    fn place_from_hand(&mut self, idx: usize, card: &Card, color: Color) -> Result<()> {
        Player::check_placement(card, color)?;
        let player = &mut self.players[idx];
        player.remove_from_hand(card.id)?;
        player.place_property(card, color)?;
        self.log.log(GameEvent::PropertyPlaced {
            player_id: player.id,
            card_id: card.id,
            color,
        });
        self.finish_play(1);
        Ok(())
    }

    fn play_action(&mut self, idx: usize, card: &Card, kind: ActionKind, target: PlayTarget) -> Result<()> {
        let actor = self.players[idx].id;
        let pending = match (kind, target) {
            (ActionKind::DrawTwo, PlayTarget::None) => {
                self.discard_from_hand(idx, card.id)?;
                self.log_action(actor, card.id, kind);
                let (count, reshuffled) = self.draw_into_hand(idx, self.rules.draw_two_count);
                self.log.log(GameEvent::CardsDrawn {
                    player_id: actor,
                    count,
                    reshuffled,
                });
                self.finish_play(1);
                return Ok(());
            }
            (ActionKind::AddHouse | ActionKind::AddHotel, PlayTarget::Upgrade { color }) => {
                let modifier = if kind == ActionKind::AddHouse {
                    Modifier::House
                } else {
                    Modifier::Hotel
                };
                let player = &mut self.players[idx];
                player.check_modifier(color, modifier)?;
                player.remove_from_hand(card.id)?;
                player.add_modifier(color, modifier, card.id)?;
                self.log_action(actor, card.id, kind);
                self.log.log(GameEvent::ModifierAdded {
                    player_id: actor,
                    color,
                    modifier,
                });
                self.finish_play(1);
                return Ok(());
            }
            (ActionKind::CollectFromAll, PlayTarget::None) => {
                let mut pending = PendingAction::new(PendingKind::CollectFromAll, actor, card.id);
                pending.amount = Some(self.rules.collect_from_all_amount);
                pending
            }
            (ActionKind::CollectFromOne, PlayTarget::Player { target }) => {
                self.opponent(actor, target)?;
                let mut pending = PendingAction::new(PendingKind::CollectFromOne, actor, card.id);
                pending.target = Some(target);
                pending.amount = Some(self.rules.collect_from_one_amount);
                pending
            }
            (ActionKind::StealOneProperty, PlayTarget::StealOne { target, color }) => {
                let victim = self.opponent(actor, target)?;
                victim.set(color).ok_or(DealError::SetNotFound { player: target, color })?;
                let mut pending = PendingAction::new(PendingKind::StealOneProperty, actor, card.id);
                pending.target = Some(target);
                pending.color = Some(color);
                pending
            }
            (
                ActionKind::SwapProperties,
                PlayTarget::Swap {
                    target,
                    target_color,
                    own_color,
                    own_card,
                },
            ) => {
                let victim = self.opponent(actor, target)?;
                victim.set(target_color).ok_or(DealError::SetNotFound {
                    player: target,
                    color: target_color,
                })?;
                let own = self.players[idx].set(own_color).ok_or(DealError::SetNotFound {
                    player: actor,
                    color: own_color,
                })?;
                if !own.contains(own_card) {
                    return Err(DealError::card_not_found(
                        own_card,
                        format!("{own_color} set of player {actor}"),
                    ));
                }
                let mut pending = PendingAction::new(PendingKind::SwapProperties, actor, card.id);
                pending.target = Some(target);
                pending.color = Some(target_color);
                pending.offered = Some(own_card);
                pending
            }
            (ActionKind::StealCompleteSet, PlayTarget::StealSet { target, color }) => {
                let victim = self.opponent(actor, target)?;
                let set = victim.set(color).ok_or(DealError::SetNotFound { player: target, color })?;
                if !set.is_complete {
                    return Err(DealError::IncompleteSet(color));
                }
                let mut pending = PendingAction::new(PendingKind::StealCompleteSet, actor, card.id);
                pending.target = Some(target);
                pending.color = Some(color);
                pending
            }
            (ActionKind::DoubleRent, _) => {
                return Err(DealError::CardMisuse(format!(
                    "{} can only be played together with a rent card",
                    card.name
                )));
            }
            (ActionKind::RefuseAction, _) => {
                return Err(DealError::CardMisuse(format!(
                    "{} can only be played in response to an action",
                    card.name
                )));
            }
            _ => {
                return Err(DealError::CardMisuse(format!(
                    "{} cannot be played with that target",
                    card.name
                )));
            }
        };

        if self.players.len() < 2 {
            return Err(DealError::InvalidTarget("nobody to target".to_string()));
        }
        self.discard_from_hand(idx, card.id)?;
        self.log_action(actor, card.id, kind);
        self.open_pending(pending, 1);
        Ok(())
    }

    fn play_rent(
        &mut self,
        idx: usize,
        card: &Card,
        wild: bool,
        color: Color,
        target: Option<PlayerId>,
        doubler: Option<CardId>,
    ) -> Result<()> {
        let actor = self.players[idx].id;
        if !card.charges_for(color) {
            return Err(DealError::CardMisuse(format!(
                "{} does not charge rent for {color}",
                card.name
            )));
        }
        let base = self.players[idx].rent_for(color);
        if base == 0 {
            return Err(DealError::SetNotFound { player: actor, color });
        }
        match (wild, target) {
            (true, Some(target)) => {
                self.opponent(actor, target)?;
            }
            (true, None) => {
                return Err(DealError::InvalidTarget("wild rent needs a target".to_string()));
            }
            (false, Some(_)) => {
                return Err(DealError::InvalidTarget(
                    "fixed rent is charged to every opponent".to_string(),
                ));
            }
            (false, None) => {}
        }

        let mut cost = 1;
        if let Some(doubler) = doubler {
            let is_doubler = self.players[idx].holds(doubler)
                && self.cards.get(doubler)?.is_action(ActionKind::DoubleRent);
            if !is_doubler {
                return Err(DealError::CardMisuse(format!(
                    "card {doubler} is not a double-rent card in hand"
                )));
            }
            if self.turn.actions_remaining < 2 {
                return Err(DealError::CardMisuse(
                    "no action left to play the double-rent card".to_string(),
                ));
            }
            cost = 2;
        }

        let amount = base * cost as u32;
        self.discard_from_hand(idx, card.id)?;
        if let Some(doubler) = doubler {
            self.discard_from_hand(idx, doubler)?;
        }
        self.log.log(GameEvent::RentCharged {
            player_id: actor,
            card_id: card.id,
            color,
            amount,
            doubled: doubler.is_some(),
        });

        let mut pending = PendingAction::new(PendingKind::Rent, actor, card.id);
        pending.target = target;
        pending.color = Some(color);
        pending.amount = Some(amount);
        self.open_pending(pending, cost);
        Ok(())
    }

    /// Discard down to the hand limit; the turn passes once the hand fits
    pub fn discard(&mut self, actor: PlayerId, cards: &[CardId]) -> Result<()> {
        let idx = self.ensure_actor_turn(actor)?;
        self.expect_turn_phase(self.turn.phase == TurnPhase::Discard)?;

        let hand = &self.players[idx].hand;
        let excess = hand.len().saturating_sub(self.rules.hand_limit);
        if cards.is_empty() {
            return Err(DealError::InvalidDiscard("no cards named".to_string()));
        }
        if cards.len() > excess {
            return Err(DealError::InvalidDiscard(format!(
                "only {excess} card(s) over the hand limit"
            )));
        }
        for (i, card_id) in cards.iter().enumerate() {
            if cards[..i].contains(card_id) {
                return Err(DealError::InvalidDiscard(format!("card {card_id} named twice")));
            }
            if !hand.contains(card_id) {
                return Err(DealError::card_not_found(*card_id, format!("hand of player {actor}")));
            }
        }

        for &card_id in cards {
            self.discard_from_hand(idx, card_id)?;
        }
        self.log.log(GameEvent::CardsDiscarded {
            player_id: actor,
            cards: cards.to_vec(),
        });
        if self.players[idx].hand.len() <= self.rules.hand_limit {
            self.advance_turn();
        }
        Ok(())
    }

    /// Move one of the actor's wildcards to another of its legal colors
    pub fn rearrange_wildcard(&mut self, actor: PlayerId, card_id: CardId, from: Color, to: Color) -> Result<()> {
        let idx = self.ensure_actor_turn(actor)?;
        self.expect_turn_phase(self.turn.phase.can_rearrange())?;
        let card = self.cards.get(card_id)?.clone();
        self.players[idx].relocate_wildcard(&card, from, to)?;
        self.log.log(GameEvent::WildcardMoved {
            player_id: actor,
            card_id,
            from,
            to,
        });
        self.check_winner();
        Ok(())
    }

    /// Stop playing for this turn
    ///
    /// With too many cards in hand the participant must discard first and
    /// the turn passes once the hand fits.
    pub fn end_turn(&mut self, actor: PlayerId) -> Result<()> {
        let idx = self.ensure_actor_turn(actor)?;
        self.expect_turn_phase(self.turn.phase.can_end_turn())?;
        if self.players[idx].hand.len() > self.rules.hand_limit {
            self.turn.phase = TurnPhase::Discard;
        } else {
            self.advance_turn();
        }
        Ok(())
    }

    // ---- helpers ------------------------------------------------------------

    /// Look up `target` as an opponent of `actor`
    fn opponent(&self, actor: PlayerId, target: PlayerId) -> Result<&Player> {
        if target == actor {
            return Err(DealError::InvalidTarget("cannot target yourself".to_string()));
        }
        self.get_player(target)
    }

    fn discard_from_hand(&mut self, idx: usize, card_id: CardId) -> Result<()> {
        self.players[idx].remove_from_hand(card_id)?;
        self.discard_pile.add(card_id);
        Ok(())
    }

    fn log_action(&mut self, player_id: PlayerId, card_id: CardId, kind: ActionKind) {
        self.log.log(GameEvent::ActionPlayed {
            player_id,
            card_id,
            kind,
        });
    }

    /// Charge the budget for a play that resolved immediately
    fn finish_play(&mut self, cost: u8) {
        self.turn.spend(cost);
        self.settle_phase();
        self.check_winner();
    }

    fn open_pending(&mut self, pending: PendingAction, cost: u8) {
        self.turn.spend(cost);
        self.turn.phase = TurnPhase::Responding;
        self.log.log(GameEvent::PendingOpened {
            kind: pending.kind,
            initiator: pending.initiator,
            target: pending.target,
        });
        self.pending = Some(pending);
    }
}
