//! Pending actions and the response protocol
//!
//! A card that affects other participants opens a `PendingAction` and the
//! turn waits in `responding` until it is answered. Single-target actions
//! have one responder and support a refusal chain; broadcast actions
//! collect one independent answer from every other participant.
//!
//! Refusal chain, from the target's first refusal:
//!
//! ```text
//! target refuses ──► initiator has a refusal card? ── no ──► cancelled
//!                                 │ yes
//!                                 ▼
//!                    initiator answers (countered)
//!                      accept ──► cancelled
//!                      refuse ──► target answers again, as at the start
//! ```
//!
//! Every response moves the chain exactly one step, and each step burns a
//! refusal card, so the chain always ends.

use crate::action_log::GameEvent;
use crate::core::{ActionKind, CardId, Color, PlayerId};
use crate::game::payment::validate_payment;
use crate::game::{GameState, MatchPhase};
use crate::{DealError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingKind {
    CollectFromAll,
    CollectFromOne,
    Rent,
    StealOneProperty,
    SwapProperties,
    StealCompleteSet,
}

/// The single in-flight action awaiting responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: PendingKind,

    /// Participant who played the card (never changes during a chain)
    pub initiator: PlayerId,

    /// Single responder; `None` for broadcast actions
    pub target: Option<PlayerId>,

    /// Color of the set being charged, stolen from or broken
    pub color: Option<Color>,

    /// Amount owed by each responder
    pub amount: Option<u32>,

    /// The card that opened this action
    pub card: CardId,

    /// The initiator's own card given away in a swap
    pub offered: Option<CardId>,

    /// Whether the participant currently answering may still refuse
    pub refusable: bool,

    /// Broadcast responders who have answered
    pub responded: Vec<PlayerId>,

    /// Broadcast responders who refused and owe nothing
    pub neutralized: Vec<PlayerId>,

    /// The target refused and the initiator now has to answer that refusal
    pub countered: bool,
}

impl PendingAction {
    pub fn new(kind: PendingKind, initiator: PlayerId, card: CardId) -> Self {
        PendingAction {
            kind,
            initiator,
            target: None,
            color: None,
            amount: None,
            card,
            offered: None,
            refusable: true,
            responded: Vec::new(),
            neutralized: Vec::new(),
            countered: false,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.target.is_none()
    }

    /// Participant whose answer is currently awaited on a single-target action
    pub fn current_responder(&self) -> Option<PlayerId> {
        if self.countered {
            Some(self.initiator)
        } else {
            self.target
        }
    }

    /// Is `id` expected to answer right now?
    pub fn awaits(&self, id: PlayerId) -> bool {
        if self.is_broadcast() {
            id != self.initiator && !self.responded.contains(&id)
        } else {
            self.current_responder() == Some(id)
        }
    }
}

/// How a responder answers a pending action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// Let the action happen
    ///
    /// `payment` settles money actions; `surrender` names the card taken by
    /// a steal or swap. A countered initiator accepts with both empty to let
    /// the refusal stand.
    Accept {
        #[serde(default)]
        payment: Vec<CardId>,
        #[serde(default)]
        surrender: Option<CardId>,
    },
    /// Play a refusal card from hand
    Refuse { card: CardId },
}

impl Reply {
    /// Accept with nothing to hand over
    pub fn accept() -> Self {
        Reply::Accept {
            payment: Vec::new(),
            surrender: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub responder: PlayerId,
    pub reply: Reply,
}

impl GameState {
    /// Apply one response to the pending action
    pub fn respond(&mut self, response: ActionResponse) -> Result<()> {
        self.expect_match_phase(MatchPhase::Playing)?;
        let responder = response.responder;
        let ridx = self.player_idx(responder)?;
        let pending = self.pending.as_ref().ok_or(DealError::NoPendingAction)?;

        if pending.is_broadcast() && pending.responded.contains(&responder) {
            return Err(DealError::AlreadyResponded(responder));
        }
        if !pending.awaits(responder) {
            return Err(DealError::NotARespondent(responder));
        }

        match response.reply {
            Reply::Refuse { card } => self.refuse(ridx, card),
            Reply::Accept { payment, surrender } => self.accept(ridx, &payment, surrender),
        }
    }

    fn refuse(&mut self, ridx: usize, card_id: CardId) -> Result<()> {
        let responder = self.players[ridx].id;
        let Some(pending) = self.pending.as_ref() else {
            return Err(DealError::NoPendingAction);
        };
        if !pending.refusable {
            return Err(DealError::CardMisuse("this action can no longer be refused".to_string()));
        }
        if !self.players[ridx].holds(card_id) {
            return Err(DealError::card_not_found(card_id, format!("hand of player {responder}")));
        }
        if !self.cards.get(card_id)?.is_action(ActionKind::RefuseAction) {
            return Err(DealError::CardMisuse(format!("card {card_id} is not a refusal card")));
        }

        self.players[ridx].remove_from_hand(card_id)?;
        self.discard_pile.add(card_id);
        self.log.log(GameEvent::ActionRefused {
            player_id: responder,
            card_id,
        });

        let Some(pending) = self.pending.as_mut() else {
            return Err(DealError::NoPendingAction);
        };
        if pending.is_broadcast() {
            pending.responded.push(responder);
            pending.neutralized.push(responder);
            self.close_broadcast_if_done();
            return Ok(());
        }

        let initiator = pending.initiator;
        let target = pending.target;
        if pending.countered {
            // The initiator refused the refusal: back to the target
            let target_can_refuse = match target {
                Some(t) => self.get_player(t)?.has_refusal(&self.cards),
                None => false,
            };
            if let Some(pending) = self.pending.as_mut() {
                pending.countered = false;
                pending.refusable = target_can_refuse;
            }
            if let Some(awaiting) = target {
                self.log.log(GameEvent::RolesSwapped { awaiting });
            }
        } else if self.get_player(initiator)?.has_refusal(&self.cards) {
            if let Some(pending) = self.pending.as_mut() {
                pending.countered = true;
                pending.refusable = true;
            }
            self.log.log(GameEvent::RolesSwapped { awaiting: initiator });
        } else {
            self.close_pending(true);
        }
        Ok(())
    }

    fn accept(&mut self, ridx: usize, payment: &[CardId], surrender: Option<CardId>) -> Result<()> {
        let Some(pending) = self.pending.clone() else {
            return Err(DealError::NoPendingAction);
        };

        if pending.countered {
            // The initiator lets the target's refusal stand
            if !payment.is_empty() || surrender.is_some() {
                return Err(DealError::CardMisuse(
                    "nothing is handed over when a refusal stands".to_string(),
                ));
            }
            self.close_pending(true);
            return Ok(());
        }

        let iidx = self.player_idx(pending.initiator)?;
        match pending.kind {
            PendingKind::CollectFromAll | PendingKind::CollectFromOne | PendingKind::Rent => {
                if surrender.is_some() {
                    return Err(DealError::CardMisuse("money actions take a payment, not a card".to_string()));
                }
                let required = pending.amount.unwrap_or(0);
                let value = validate_payment(&self.players[ridx], &self.cards, payment, required)?;
                self.transfer_payment(ridx, iidx, payment, value)?;
            }
            PendingKind::StealOneProperty | PendingKind::SwapProperties => {
                if !payment.is_empty() {
                    return Err(DealError::CardMisuse("a steal takes a card, not a payment".to_string()));
                }
                let color = pending.color.ok_or(DealError::InvalidTarget("no color named".to_string()))?;
                let card_id = surrender.ok_or(DealError::InvalidTarget(
                    "name the property to hand over".to_string(),
                ))?;
                let in_set = self.players[ridx].set(color).map(|s| s.contains(card_id)).unwrap_or(false);
                if !in_set {
                    return Err(DealError::card_not_found(
                        card_id,
                        format!("{color} set of player {}", self.players[ridx].id),
                    ));
                }
                if pending.kind == PendingKind::SwapProperties {
                    let own = pending.offered.ok_or(DealError::InvalidTarget("no card offered".to_string()))?;
                    if self.players[iidx].property_color(own).is_none() {
                        return Err(DealError::card_not_found(
                            own,
                            format!("properties of player {}", pending.initiator),
                        ));
                    }
                    self.transfer_property(ridx, iidx, card_id)?;
                    self.transfer_property(iidx, ridx, own)?;
                } else {
                    self.transfer_property(ridx, iidx, card_id)?;
                }
            }
            PendingKind::StealCompleteSet => {
                if !payment.is_empty() || surrender.is_some() {
                    return Err(DealError::CardMisuse("a whole set is taken; name no cards".to_string()));
                }
                let color = pending.color.ok_or(DealError::InvalidTarget("no color named".to_string()))?;
                let set = self.players[ridx].take_set(color).ok_or(DealError::SetNotFound {
                    player: self.players[ridx].id,
                    color,
                })?;
                self.players[iidx].receive_set(set);
                self.log.log(GameEvent::SetTransferred {
                    from: self.players[ridx].id,
                    to: pending.initiator,
                    color,
                });
            }
        }

        if pending.is_broadcast() {
            let responder = self.players[ridx].id;
            if let Some(pending) = self.pending.as_mut() {
                pending.responded.push(responder);
            }
            self.check_winner();
            self.close_broadcast_if_done();
        } else {
            self.close_pending(false);
            self.check_winner();
        }
        Ok(())
    }

    fn close_broadcast_if_done(&mut self) {
        let done = match &self.pending {
            Some(pending) => self
                .players
                .iter()
                .all(|p| p.id == pending.initiator || pending.responded.contains(&p.id)),
            None => false,
        };
        if done {
            self.close_pending(false);
        }
    }

    /// Clear the pending action and settle the acting participant's phase
    fn close_pending(&mut self, cancelled: bool) {
        if let Some(pending) = self.pending.take() {
            self.log.log(GameEvent::PendingResolved {
                kind: pending.kind,
                cancelled,
            });
            if self.match_phase == MatchPhase::Playing {
                self.settle_phase();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(target: Option<PlayerId>) -> PendingAction {
        let mut p = PendingAction::new(PendingKind::CollectFromOne, PlayerId::new(0), CardId::new(50));
        p.target = target;
        p
    }

    #[test]
    fn test_single_target_awaits() {
        let mut p = pending(Some(PlayerId::new(1)));
        assert!(!p.is_broadcast());
        assert!(p.awaits(PlayerId::new(1)));
        assert!(!p.awaits(PlayerId::new(0)));

        p.countered = true;
        assert_eq!(p.current_responder(), Some(PlayerId::new(0)));
        assert!(!p.awaits(PlayerId::new(1)));
    }

    #[test]
    fn test_broadcast_awaits_everyone_else_once() {
        let mut p = pending(None);
        assert!(p.is_broadcast());
        assert!(!p.awaits(PlayerId::new(0)));
        assert!(p.awaits(PlayerId::new(2)));
        p.responded.push(PlayerId::new(2));
        assert!(!p.awaits(PlayerId::new(2)));
    }

    #[test]
    fn test_reply_json() {
        let reply: Reply = serde_json::from_str(r#"{"type":"accept","payment":[3,4]}"#).unwrap();
        assert_eq!(
            reply,
            Reply::Accept {
                payment: vec![CardId::new(3), CardId::new(4)],
                surrender: None
            }
        );
        let reply: Reply = serde_json::from_str(r#"{"type":"refuse","card":7}"#).unwrap();
        assert_eq!(reply, Reply::Refuse { card: CardId::new(7) });
    }
}
