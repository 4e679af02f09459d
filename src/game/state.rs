//! Main game state structure

use crate::action_log::{ActionLog, GameEvent};
use crate::core::{CardCatalog, CardId, Player, PlayerId, PlayerName, RoomId, SessionHandle};
use crate::game::{MatchPhase, PendingAction, RuleSet, TurnPhase, TurnStructure};
use crate::loader::DeckList;
use crate::zones::{CardZone, Zone};
use crate::{DealError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Complete game state
///
/// This is the root aggregate for one match. Every card of the catalog is
/// somewhere in here at all times: a pile, a hand, a bank or a property set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Room this match belongs to (snapshot key)
    pub room: RoomId,

    pub rules: RuleSet,

    /// All cards in the game, by ID
    pub cards: CardCatalog,

    /// Participants in seat order (Vec for stable ordering, small count)
    pub players: Vec<Player>,

    pub draw_pile: CardZone,

    pub discard_pile: CardZone,

    pub match_phase: MatchPhase,

    /// Turn structure
    pub turn: TurnStructure,

    /// The single in-flight action awaiting responses
    pub pending: Option<PendingAction>,

    pub winner: Option<PlayerId>,

    /// Shuffle source (serializable so a snapshot resumes the same sequence)
    pub rng: ChaCha12Rng,

    next_player_id: u32,

    /// Events produced by successful operations, kept until drained
    pub log: ActionLog,
}

impl GameState {
    /// Create an empty match in the `waiting` phase, shuffled from entropy
    pub fn new(room: impl Into<RoomId>) -> Self {
        Self::with_rng(room.into(), RuleSet::default(), ChaCha12Rng::from_entropy())
    }

    /// Create an empty match with a deterministic shuffle
    pub fn with_seed(room: impl Into<RoomId>, seed: u64) -> Self {
        Self::with_rng(room.into(), RuleSet::default(), ChaCha12Rng::seed_from_u64(seed))
    }

    /// Create an empty match with custom rules
    pub fn with_rules(room: impl Into<RoomId>, rules: RuleSet, seed: u64) -> Result<Self> {
        rules.validate()?;
        Ok(Self::with_rng(room.into(), rules, ChaCha12Rng::seed_from_u64(seed)))
    }

    fn with_rng(room: RoomId, rules: RuleSet, rng: ChaCha12Rng) -> Self {
        let cards = DeckList::build_catalog();
        let mut draw_pile = CardZone::new(Zone::DrawPile);
        for id in cards.sorted_ids() {
            draw_pile.add(id);
        }

        GameState {
            room,
            turn: TurnStructure::new(rules.actions_per_turn),
            rules,
            cards,
            players: Vec::new(),
            draw_pile,
            discard_pile: CardZone::new(Zone::DiscardPile),
            match_phase: MatchPhase::Waiting,
            pending: None,
            winner: None,
            rng,
            next_player_id: 0,
            log: ActionLog::new(),
        }
    }

    /// Set the RNG seed for deterministic gameplay
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    // ---- participants -----------------------------------------------------

    /// Seat a new participant; only legal before the match starts
    pub fn add_participant(
        &mut self,
        name: impl Into<PlayerName>,
        session: Option<SessionHandle>,
    ) -> Result<PlayerId> {
        self.expect_match_phase(MatchPhase::Waiting)?;
        if self.players.len() >= self.rules.max_players {
            return Err(DealError::InvalidPlayerCount {
                found: self.players.len() + 1,
                min: self.rules.min_players,
                max: self.rules.max_players,
            });
        }

        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;
        self.players.push(Player::new(id, name, session));
        Ok(id)
    }

    /// Drop a participant
    ///
    /// Before the match starts the seat is freed. Once cards are dealt the
    /// participant keeps their seat and cards and is only marked
    /// disconnected, so no card leaves the game.
    pub fn remove_participant(&mut self, id: PlayerId) -> Result<()> {
        let idx = self.player_idx(id)?;
        if self.match_phase == MatchPhase::Waiting {
            self.players.remove(idx);
        } else {
            self.players[idx].connected = false;
        }
        Ok(())
    }

    pub fn set_connected(&mut self, id: PlayerId, connected: bool) -> Result<()> {
        self.get_player_mut(id)?.connected = connected;
        Ok(())
    }

    /// Find the participant bound to a transport handle
    pub fn participant_by_session(&self, session: &SessionHandle) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.session.as_ref() == Some(session))
            .map(|p| p.id)
    }

    /// Shuffle the whole catalog and deal opening hands
    pub fn start_match(&mut self) -> Result<()> {
        self.expect_match_phase(MatchPhase::Waiting)?;
        let count = self.players.len();
        if count < self.rules.min_players || count > self.rules.max_players {
            return Err(DealError::InvalidPlayerCount {
                found: count,
                min: self.rules.min_players,
                max: self.rules.max_players,
            });
        }

        let mut all = self.draw_pile.take_all();
        all.extend(self.discard_pile.take_all());
        all.sort();
        self.draw_pile.cards = all;
        self.draw_pile.shuffle(&mut self.rng);

        for idx in 0..count {
            let opening = self.rules.opening_hand;
            self.draw_into_hand(idx, opening);
        }

        self.match_phase = MatchPhase::Playing;
        self.turn = TurnStructure::new(self.rules.actions_per_turn);
        self.log.log(GameEvent::MatchStarted {
            players: self.players.iter().map(|p| p.id).collect(),
        });
        Ok(())
    }

    // ---- lookups ----------------------------------------------------------

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(DealError::UnknownParticipant(id))
    }

    /// Get a mutable player by ID
    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DealError::UnknownParticipant(id))
    }

    /// Get the index of a player by ID
    pub fn player_idx(&self, id: PlayerId) -> Result<usize> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(DealError::UnknownParticipant(id))
    }

    /// Participant whose turn it is, once the match has started
    pub fn current_player_id(&self) -> Option<PlayerId> {
        match self.match_phase {
            MatchPhase::Waiting => None,
            _ => self.players.get(self.turn.current_idx).map(|p| p.id),
        }
    }

    /// Get the next player in turn order
    pub fn next_player_idx(&self, current_idx: usize) -> usize {
        (current_idx + 1) % self.players.len()
    }

    /// Everyone except `id`, in seat order
    pub fn opponents(&self, id: PlayerId) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(move |p| p.id != id)
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    pub fn is_finished(&self) -> bool {
        self.match_phase == MatchPhase::Finished
    }

    // ---- guards -----------------------------------------------------------

    pub(crate) fn expect_match_phase(&self, expected: MatchPhase) -> Result<()> {
        if self.match_phase != expected {
            return Err(DealError::WrongMatchPhase {
                expected,
                actual: self.match_phase,
            });
        }
        Ok(())
    }

    /// Common preconditions of every turn-bound operation; returns the
    /// actor's seat index
    pub(crate) fn ensure_actor_turn(&self, actor: PlayerId) -> Result<usize> {
        self.expect_match_phase(MatchPhase::Playing)?;
        let idx = self.player_idx(actor)?;
        if self.pending.is_some() {
            return Err(DealError::PendingActionUnresolved);
        }
        if idx != self.turn.current_idx {
            return Err(DealError::NotYourTurn(actor));
        }
        Ok(idx)
    }

    pub(crate) fn expect_turn_phase(&self, allowed: bool) -> Result<()> {
        if !allowed {
            return Err(DealError::WrongPhase { actual: self.turn.phase });
        }
        Ok(())
    }

    // ---- card movement helpers ---------------------------------------------

    /// Move up to `count` cards from the draw pile into a hand
    ///
    /// When the draw pile runs dry the discard pile is shuffled back in.
    /// Returns how many cards were drawn and whether a reshuffle happened.
    pub(crate) fn draw_into_hand(&mut self, idx: usize, count: usize) -> (usize, bool) {
        let mut drawn = 0;
        let mut reshuffled = false;
        while drawn < count {
            if self.draw_pile.is_empty() && !self.discard_pile.is_empty() {
                self.draw_pile.cards = self.discard_pile.take_all();
                self.draw_pile.shuffle(&mut self.rng);
                reshuffled = true;
            }
            match self.draw_pile.draw_top() {
                Some(card_id) => {
                    self.players[idx].hand.push(card_id);
                    drawn += 1;
                }
                None => break,
            }
        }
        (drawn, reshuffled)
    }

    /// Settle the turn phase for the active participant after a play or a
    /// resolved pending action
    pub(crate) fn settle_phase(&mut self) {
        let hand = self.players[self.turn.current_idx].hand.len();
        self.turn.phase = self.turn.settled_phase(hand, self.rules.hand_limit);
    }

    /// Hand the turn to the next seat
    pub(crate) fn advance_turn(&mut self) {
        let from_player = self.players[self.turn.current_idx].id;
        let next = self.next_player_idx(self.turn.current_idx);
        self.turn.next_turn(next, self.rules.actions_per_turn);
        self.log.log(GameEvent::TurnPassed {
            from_player,
            to_player: self.players[next].id,
            turn_number: self.turn.turn_number,
        });
    }

    // ---- invariants -------------------------------------------------------

    /// Every card currently located somewhere, sorted
    pub fn located_cards(&self) -> Vec<CardId> {
        let mut all: Vec<CardId> = self
            .draw_pile
            .cards
            .iter()
            .chain(self.discard_pile.cards.iter())
            .copied()
            .chain(self.players.iter().flat_map(|p| p.all_cards()))
            .collect();
        all.sort();
        all
    }

    /// Check that every catalog card is in exactly one place
    pub fn check_conservation(&self) -> Result<()> {
        let located = self.located_cards();
        let expected = self.cards.sorted_ids();
        if located == expected {
            return Ok(());
        }
        let missing = expected.iter().find(|id| located.binary_search(id).is_err());
        let duplicated = located.windows(2).find(|w| w[0] == w[1]).map(|w| w[0]);
        match missing.copied().or(duplicated) {
            Some(card) => Err(DealError::card_not_found(card, "exactly one location")),
            None => Err(DealError::card_not_found(CardId::new(u32::MAX), "catalog")),
        }
    }
}
