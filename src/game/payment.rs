//! Payment settlement and property transfers between participants

use crate::action_log::GameEvent;
use crate::core::{CardId, CardCatalog, Player};
use crate::game::GameState;
use crate::{DealError, Result};

/// Where a payment card currently sits on the payer's table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Bank,
    Property,
}

/// Check an offered payment without moving anything
///
/// The offer must be distinct cards from the payer's bank or property
/// sets, worth at least the amount owed or everything the payer has,
/// whichever is smaller. Returns the offered total.
pub fn validate_payment(payer: &Player, catalog: &CardCatalog, offered: &[CardId], required: u32) -> Result<u32> {
    let mut total = 0;
    for (i, &card_id) in offered.iter().enumerate() {
        if offered[..i].contains(&card_id) {
            return Err(DealError::CardMisuse(format!("card {card_id} offered twice")));
        }
        locate(payer, card_id)?;
        total += catalog.get(card_id)?.value;
    }

    let owed = required.min(payer.liquid_value(catalog));
    if total < owed {
        return Err(DealError::InsufficientPayment {
            offered: total,
            required: owed,
        });
    }
    Ok(total)
}

fn locate(payer: &Player, card_id: CardId) -> Result<Source> {
    if payer.in_bank(card_id) {
        Ok(Source::Bank)
    } else if payer.property_color(card_id).is_some() {
        Ok(Source::Property)
    } else {
        Err(DealError::card_not_found(
            card_id,
            format!("bank or properties of player {}", payer.id),
        ))
    }
}

/// Greedy payment: cheapest cards first until the debt is covered
///
/// Used by automated controllers; the result always passes
/// `validate_payment`.
pub fn suggest_payment(payer: &Player, catalog: &CardCatalog, required: u32) -> Vec<CardId> {
    let mut candidates: Vec<(u32, CardId)> = payer
        .bank
        .iter()
        .copied()
        .chain(payer.sets.iter().flat_map(|s| s.cards.iter().copied()))
        .filter_map(|id| catalog.get(id).ok().map(|c| (c.value, id)))
        .collect();
    candidates.sort();

    let owed = required.min(payer.liquid_value(catalog));
    let mut paid = 0;
    let mut chosen = Vec::new();
    for (value, id) in candidates {
        if paid >= owed {
            break;
        }
        paid += value;
        chosen.push(id);
    }
    chosen
}

impl GameState {
    /// Move validated payment cards from `from` to `to`
    ///
    /// Bank cards land in the receiver's bank; property cards keep their
    /// color and join the receiver's set of that color.
    pub(crate) fn transfer_payment(&mut self, from: usize, to: usize, cards: &[CardId], value: u32) -> Result<()> {
        for &card_id in cards {
            match locate(&self.players[from], card_id)? {
                Source::Bank => {
                    self.players[from].remove_from_bank(card_id);
                    self.players[to].bank.push(card_id);
                }
                Source::Property => self.transfer_property(from, to, card_id)?,
            }
        }
        self.log.log(GameEvent::PaymentMade {
            from: self.players[from].id,
            to: self.players[to].id,
            cards: cards.to_vec(),
            value,
        });
        Ok(())
    }

    /// Move one property card between participants, keeping its color
    pub(crate) fn transfer_property(&mut self, from: usize, to: usize, card_id: CardId) -> Result<()> {
        let color = self.players[from].take_property(card_id).ok_or_else(|| {
            DealError::card_not_found(card_id, format!("properties of player {}", self.players[from].id))
        })?;
        self.players[to].place_unchecked(card_id, color);
        self.log.log(GameEvent::PropertyTransferred {
            from: self.players[from].id,
            to: self.players[to].id,
            card_id,
            color,
        });
        Ok(())
    }
}
