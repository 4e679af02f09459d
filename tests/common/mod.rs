//! Shared rig for integration tests: build exact hands and boards

#![allow(dead_code)]

use property_deal_rs::core::{CardId, Color, PlayerId};
use property_deal_rs::game::{ActionResponse, GameState, Intent, PlayTarget, Reply, TurnPhase};

pub struct Table {
    pub game: GameState,
    pub ids: Vec<PlayerId>,
}

impl Table {
    /// Started match with `seats` participants and every hand emptied into
    /// the discard pile, so tests control exactly what each player holds
    pub fn new(seats: usize) -> Self {
        let mut table = Self::dealt(seats);
        for player in &mut table.game.players {
            let hand = std::mem::take(&mut player.hand);
            table.game.discard_pile.cards.extend(hand);
        }
        table
    }

    /// Started match with the opening hands left in place
    pub fn dealt(seats: usize) -> Self {
        let mut game = GameState::with_seed("test-room", 7);
        let names = ["Alice", "Bob", "Carol", "Dave", "Erin"];
        let ids = names[..seats]
            .iter()
            .map(|n| game.add_participant(*n, None).unwrap())
            .collect();
        game.start_match().unwrap();
        game.log.drain();
        Table { game, ids }
    }

    pub fn seat(&self, i: usize) -> PlayerId {
        self.ids[i]
    }

    /// Take the first loose card named `name` out of the piles or a hand
    fn detach(&mut self, name: &str) -> CardId {
        let game = &mut self.game;
        let cards = &game.cards;
        let named = |id: CardId| cards.get(id).map(|c| c.name.as_str() == name).unwrap_or(false);

        if let Some(pos) = game.draw_pile.cards.iter().position(|&id| named(id)) {
            return game.draw_pile.cards.remove(pos);
        }
        if let Some(pos) = game.discard_pile.cards.iter().position(|&id| named(id)) {
            return game.discard_pile.cards.remove(pos);
        }
        for player in &mut game.players {
            if let Some(pos) = player.hand.iter().position(|&id| named(id)) {
                return player.hand.remove(pos);
            }
        }
        panic!("no loose card named {name}");
    }

    pub fn to_hand(&mut self, seat: usize, name: &str) -> CardId {
        let id = self.detach(name);
        self.game.players[seat].hand.push(id);
        id
    }

    pub fn to_bank(&mut self, seat: usize, name: &str) -> CardId {
        let id = self.detach(name);
        self.game.players[seat].bank.push(id);
        id
    }

    pub fn to_set(&mut self, seat: usize, name: &str, color: Color) -> CardId {
        let id = self.detach(name);
        let card = self.game.cards.get(id).unwrap().clone();
        self.game.players[seat].place_property(&card, color).unwrap();
        id
    }

    /// Finish the current player's draw so they can act, setting the drawn
    /// cards aside so the hand holds only what the test puts there
    pub fn draw(&mut self) {
        let actor = self.game.current_player_id().unwrap();
        self.game.draw(actor).unwrap();
        assert_eq!(self.game.turn.phase, TurnPhase::Action);
        let idx = self.game.player_idx(actor).unwrap();
        let hand = std::mem::take(&mut self.game.players[idx].hand);
        self.game.discard_pile.cards.extend(hand);
        self.game.log.drain();
    }

    pub fn play(&mut self, seat: usize, card: CardId, target: PlayTarget) {
        let actor = self.seat(seat);
        self.game.apply(actor, Intent::Play { card, target }).unwrap();
    }

    pub fn reply(&mut self, seat: usize, reply: Reply) -> property_deal_rs::Result<()> {
        self.game.respond(ActionResponse {
            responder: self.seat(seat),
            reply,
        })
    }

    pub fn pay(&mut self, seat: usize, payment: Vec<CardId>) -> property_deal_rs::Result<()> {
        self.reply(seat, Reply::Accept { payment, surrender: None })
    }

    pub fn refuse(&mut self, seat: usize, card: CardId) -> property_deal_rs::Result<()> {
        self.reply(seat, Reply::Refuse { card })
    }

    pub fn bank_value(&self, seat: usize) -> u32 {
        self.game.players[seat].bank_value(&self.game.cards)
    }

    pub fn assert_consistent(&self) {
        self.game.check_conservation().unwrap();
        assert_eq!(
            self.game.pending.is_some(),
            self.game.turn.phase == TurnPhase::Responding,
            "pending action and responding phase disagree"
        );
    }
}
