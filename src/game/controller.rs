//! Player intents, legal-move enumeration and the controller trait
//!
//! An `Intent` is one call into the engine on behalf of a participant.
//! `legal_intents` lists a representative set of intents the engine would
//! accept right now, and a `PlayerController` picks among them.

use crate::core::{ActionKind, Card, CardId, CardKind, Color, Modifier, PlayerId};
use crate::game::payment::suggest_payment;
use crate::game::view::GameView;
use crate::game::{ActionResponse, GameState, MatchPhase, PendingKind, PlayTarget, Reply, TurnPhase};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One operation a participant can ask for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Draw,
    Play { card: CardId, target: PlayTarget },
    Respond { reply: Reply },
    Discard { cards: Vec<CardId> },
    Rearrange { card: CardId, from: Color, to: Color },
    EndTurn,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Draw => write!(f, "draw"),
            Intent::Play { card, target } => write!(f, "play {card} ({target:?})"),
            Intent::Respond { reply } => write!(f, "respond {reply:?}"),
            Intent::Discard { cards } => write!(f, "discard {cards:?}"),
            Intent::Rearrange { card, from, to } => write!(f, "move {card} from {from} to {to}"),
            Intent::EndTurn => write!(f, "end turn"),
        }
    }
}

impl GameState {
    /// Dispatch an intent to the matching operation
    pub fn apply(&mut self, actor: PlayerId, intent: Intent) -> Result<()> {
        match intent {
            Intent::Draw => self.draw(actor).map(|_| ()),
            Intent::Play { card, target } => self.play_card(actor, card, target),
            Intent::Respond { reply } => self.respond(ActionResponse {
                responder: actor,
                reply,
            }),
            Intent::Discard { cards } => self.discard(actor, &cards),
            Intent::Rearrange { card, from, to } => self.rearrange_wildcard(actor, card, from, to),
            Intent::EndTurn => self.end_turn(actor),
        }
    }

    /// Participant the game is waiting on
    ///
    /// While an action is pending that is the first participant still owing
    /// an answer, otherwise the participant whose turn it is.
    pub fn awaiting_player(&self) -> Option<PlayerId> {
        if self.match_phase != MatchPhase::Playing {
            return None;
        }
        match &self.pending {
            Some(pending) => self.players.iter().map(|p| p.id).find(|&id| pending.awaits(id)),
            None => self.current_player_id(),
        }
    }

    /// Intents the engine would accept from `actor` right now
    ///
    /// Payments are chosen greedily and a swap always offers the first card
    /// of each own set, so the list is representative rather than
    /// exhaustive. Ending the turn is listed before rearrangements so a
    /// first-choice controller cannot loop.
    pub fn legal_intents(&self, actor: PlayerId) -> Vec<Intent> {
        let mut intents = Vec::new();
        if self.match_phase != MatchPhase::Playing {
            return intents;
        }
        let Ok(idx) = self.player_idx(actor) else {
            return intents;
        };

        if let Some(pending) = &self.pending {
            if pending.awaits(actor) {
                self.response_intents(idx, &mut intents);
            }
            return intents;
        }
        if idx != self.turn.current_idx {
            return intents;
        }

        match self.turn.phase {
            TurnPhase::Draw => intents.push(Intent::Draw),
            TurnPhase::Action => {
                self.play_intents(idx, &mut intents);
                intents.push(Intent::EndTurn);
                self.rearrange_intents(idx, &mut intents);
            }
            TurnPhase::Finishing => {
                intents.push(Intent::EndTurn);
                self.rearrange_intents(idx, &mut intents);
            }
            TurnPhase::Discard => {
                for &card in &self.players[idx].hand {
                    intents.push(Intent::Discard { cards: vec![card] });
                }
            }
            TurnPhase::Responding => {}
        }
        intents
    }

    fn response_intents(&self, idx: usize, intents: &mut Vec<Intent>) {
        let Some(pending) = &self.pending else {
            return;
        };
        let player = &self.players[idx];

        if pending.countered {
            intents.push(Intent::Respond { reply: Reply::accept() });
        } else {
            match pending.kind {
                PendingKind::CollectFromAll | PendingKind::CollectFromOne | PendingKind::Rent => {
                    let payment = suggest_payment(player, &self.cards, pending.amount.unwrap_or(0));
                    intents.push(Intent::Respond {
                        reply: Reply::Accept {
                            payment,
                            surrender: None,
                        },
                    });
                }
                PendingKind::StealOneProperty | PendingKind::SwapProperties => {
                    if let Some(set) = pending.color.and_then(|c| player.set(c)) {
                        for &card in &set.cards {
                            intents.push(Intent::Respond {
                                reply: Reply::Accept {
                                    payment: Vec::new(),
                                    surrender: Some(card),
                                },
                            });
                        }
                    }
                }
                PendingKind::StealCompleteSet => {
                    intents.push(Intent::Respond { reply: Reply::accept() });
                }
            }
        }

        if pending.refusable {
            if let Some(card) = player.find_action(&self.cards, ActionKind::RefuseAction) {
                intents.push(Intent::Respond {
                    reply: Reply::Refuse { card },
                });
            }
        }
    }

    fn play_intents(&self, idx: usize, intents: &mut Vec<Intent>) {
        let player = &self.players[idx];
        let mut seen: Vec<&str> = Vec::new();

        for &card_id in &player.hand {
            let Ok(card) = self.cards.get(card_id) else {
                continue;
            };
            // Identical copies produce identical intents
            if seen.contains(&card.name.as_str()) {
                continue;
            }
            seen.push(card.name.as_str());

            let play = |target| Intent::Play { card: card_id, target };
            if !card.is_property() {
                intents.push(play(PlayTarget::Bank));
            }
            match &card.kind {
                CardKind::Money => {}
                CardKind::Property { allowed, .. } => {
                    for &color in allowed {
                        intents.push(play(PlayTarget::Property { color }));
                    }
                }
                CardKind::Action(kind) => self.action_intents(idx, card, *kind, intents),
                CardKind::Rent { .. } => self.rent_intents(idx, card, intents),
            }
        }
    }

    fn action_intents(&self, idx: usize, card: &Card, kind: ActionKind, intents: &mut Vec<Intent>) {
        let player = &self.players[idx];
        let play = |target| Intent::Play { card: card.id, target };
        let opponents = self.opponents(player.id);

        match kind {
            ActionKind::DrawTwo | ActionKind::CollectFromAll => intents.push(play(PlayTarget::None)),
            ActionKind::CollectFromOne => {
                for opp in opponents {
                    intents.push(play(PlayTarget::Player { target: opp.id }));
                }
            }
            ActionKind::StealOneProperty => {
                for opp in opponents {
                    for set in &opp.sets {
                        intents.push(play(PlayTarget::StealOne {
                            target: opp.id,
                            color: set.color,
                        }));
                    }
                }
            }
            ActionKind::SwapProperties => {
                for opp in opponents {
                    for theirs in &opp.sets {
                        for mine in &player.sets {
                            if let Some(&own_card) = mine.cards.first() {
                                intents.push(play(PlayTarget::Swap {
                                    target: opp.id,
                                    target_color: theirs.color,
                                    own_color: mine.color,
                                    own_card,
                                }));
                            }
                        }
                    }
                }
            }
            ActionKind::StealCompleteSet => {
                for opp in opponents {
                    for set in opp.sets.iter().filter(|s| s.is_complete) {
                        intents.push(play(PlayTarget::StealSet {
                            target: opp.id,
                            color: set.color,
                        }));
                    }
                }
            }
            ActionKind::AddHouse | ActionKind::AddHotel => {
                let modifier = if kind == ActionKind::AddHouse {
                    Modifier::House
                } else {
                    Modifier::Hotel
                };
                for set in &player.sets {
                    if player.check_modifier(set.color, modifier).is_ok() {
                        intents.push(play(PlayTarget::Upgrade { color: set.color }));
                    }
                }
            }
            ActionKind::DoubleRent | ActionKind::RefuseAction => {}
        }
    }

    fn rent_intents(&self, idx: usize, card: &Card, intents: &mut Vec<Intent>) {
        let player = &self.players[idx];
        let CardKind::Rent { colors, wild } = &card.kind else {
            return;
        };
        let doubler = if self.turn.actions_remaining >= 2 {
            player.find_action(&self.cards, ActionKind::DoubleRent)
        } else {
            None
        };

        for &color in colors {
            if player.rent_for(color) == 0 {
                continue;
            }
            let targets: Vec<Option<PlayerId>> = if *wild {
                self.opponents(player.id).map(|p| Some(p.id)).collect()
            } else {
                vec![None]
            };
            for target in targets {
                intents.push(Intent::Play {
                    card: card.id,
                    target: PlayTarget::Rent { color, target, doubler: None },
                });
                if doubler.is_some() {
                    intents.push(Intent::Play {
                        card: card.id,
                        target: PlayTarget::Rent { color, target, doubler },
                    });
                }
            }
        }
    }

    fn rearrange_intents(&self, idx: usize, intents: &mut Vec<Intent>) {
        let player = &self.players[idx];
        for set in &player.sets {
            for &card_id in &set.cards {
                let Ok(card) = self.cards.get(card_id) else {
                    continue;
                };
                let CardKind::Property { allowed, wildcard: true, .. } = &card.kind else {
                    continue;
                };
                for &to in allowed.iter().filter(|&&c| c != set.color) {
                    intents.push(Intent::Rearrange {
                        card: card_id,
                        from: set.color,
                        to,
                    });
                }
            }
        }
    }
}

/// Player controller trait
///
/// Implement this trait to create AI players or connect to UI. The game
/// loop calls `choose_intent` whenever the game waits on this participant.
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Pick one of the legal intents, or `None` to do nothing
    fn choose_intent(&mut self, view: &GameView, legal: &[Intent]) -> Option<Intent>;

    /// Short label used in logs
    fn name(&self) -> &str;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameView, _won: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (GameState, PlayerId, PlayerId) {
        let mut game = GameState::with_seed("room", 11);
        let a = game.add_participant("Alice", None).unwrap();
        let b = game.add_participant("Bob", None).unwrap();
        game.start_match().unwrap();
        (game, a, b)
    }

    #[test]
    fn test_draw_is_only_intent_at_turn_start() {
        let (game, a, b) = started();
        assert_eq!(game.legal_intents(a), vec![Intent::Draw]);
        assert!(game.legal_intents(b).is_empty());
        assert_eq!(game.awaiting_player(), Some(a));
    }

    #[test]
    fn test_every_listed_intent_is_accepted() {
        let (mut game, a, _) = started();
        game.apply(a, Intent::Draw).unwrap();
        for intent in game.legal_intents(a) {
            let mut copy = game.clone();
            copy.apply(a, intent.clone())
                .unwrap_or_else(|e| panic!("{intent} rejected: {e}"));
            assert!(copy.check_conservation().is_ok());
        }
    }

    #[test]
    fn test_end_turn_precedes_rearrange() {
        let (mut game, a, _) = started();
        game.apply(a, Intent::Draw).unwrap();
        let intents = game.legal_intents(a);
        let end = intents.iter().position(|i| *i == Intent::EndTurn).unwrap();
        assert!(intents[end..].iter().skip(1).all(|i| matches!(i, Intent::Rearrange { .. })));
    }
}
