//! Turn structure: dealing, drawing, the action budget, discarding and
//! turn passing

mod common;

use common::Table;
use property_deal_rs::core::Color;
use property_deal_rs::game::{GameState, Intent, PlayTarget, TurnPhase};
use property_deal_rs::DealError;

#[test]
fn test_three_player_deal_leaves_95_cards() {
    let table = Table::dealt(3);
    for player in &table.game.players {
        assert_eq!(player.hand.len(), 5);
    }
    assert_eq!(table.game.draw_pile.len(), 95);
    assert!(table.game.discard_pile.is_empty());
    table.assert_consistent();
}

#[test]
fn test_brown_set_complete_on_second_card() {
    let mut table = Table::new(3);
    table.draw();
    let first = table.to_hand(0, "Mediterranean Avenue");
    let second = table.to_hand(0, "Baltic Avenue");

    table.play(0, first, PlayTarget::Property { color: Color::Brown });
    assert!(!table.game.players[0].set(Color::Brown).unwrap().is_complete);

    table.play(0, second, PlayTarget::Property { color: Color::Brown });
    assert!(table.game.players[0].set(Color::Brown).unwrap().is_complete);
    table.assert_consistent();
}

#[test]
fn test_budget_of_three_then_turn_passes() {
    let mut table = Table::new(3);
    table.draw();
    let cash: Vec<_> = (0..4).map(|_| table.to_hand(0, "1M")).collect();

    for &card in &cash[..3] {
        table.play(0, card, PlayTarget::Bank);
    }
    assert_eq!(table.game.turn.actions_remaining, 0);
    assert_eq!(table.game.turn.phase, TurnPhase::Finishing);

    let err = table
        .game
        .play_card(table.seat(0), cash[3], PlayTarget::Bank)
        .unwrap_err();
    assert!(matches!(err, DealError::WrongPhase { .. }));

    table.game.end_turn(table.seat(0)).unwrap();
    assert_eq!(table.game.turn.current_idx, 1);
    assert_eq!(table.game.turn.turn_number, 2);
    assert_eq!(table.game.turn.phase, TurnPhase::Draw);
    assert_eq!(table.game.turn.actions_remaining, 3);
    table.assert_consistent();
}

#[test]
fn test_turns_advance_by_one_and_wrap() {
    let mut table = Table::new(3);
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(table.game.turn.current_idx);
        let actor = table.game.current_player_id().unwrap();
        table.game.apply(actor, Intent::Draw).unwrap();
        table.game.apply(actor, Intent::EndTurn).unwrap();
    }
    assert_eq!(seen, vec![0, 1, 2, 0]);
}

#[test]
fn test_end_turn_over_hand_limit_requires_discard() {
    let mut table = Table::new(2);
    table.draw();
    let mut hand: Vec<_> = (0..5).map(|_| table.to_hand(0, "1M")).collect();
    hand.extend((0..4).map(|_| table.to_hand(0, "2M")));
    let alice = table.seat(0);

    table.game.end_turn(alice).unwrap();
    assert_eq!(table.game.turn.phase, TurnPhase::Discard);
    assert_eq!(table.game.turn.current_idx, 0);

    let err = table.game.discard(alice, &hand[..3]).unwrap_err();
    assert!(matches!(err, DealError::InvalidDiscard(_)));
    assert_eq!(table.game.players[0].hand.len(), 9);

    table.game.discard(alice, &hand[..1]).unwrap();
    assert_eq!(table.game.turn.current_idx, 0, "still one card over");
    table.game.discard(alice, &hand[1..2]).unwrap();
    assert_eq!(table.game.turn.current_idx, 1);
    assert_eq!(table.game.players[0].hand.len(), 7);
    table.assert_consistent();
}

#[test]
fn test_out_of_turn_play_is_rejected() {
    let mut table = Table::new(2);
    table.draw();
    let card = table.to_hand(1, "1M");
    let err = table
        .game
        .play_card(table.seat(1), card, PlayTarget::Bank)
        .unwrap_err();
    assert!(matches!(err, DealError::NotYourTurn(_)));
}

#[test]
fn test_companion_cards_cannot_be_played_alone() {
    let mut table = Table::new(2);
    table.draw();
    let doubler = table.to_hand(0, "Double The Rent");
    let refusal = table.to_hand(0, "Just Say No");
    let alice = table.seat(0);

    for card in [doubler, refusal] {
        let err = table.game.play_card(alice, card, PlayTarget::None).unwrap_err();
        assert!(matches!(err, DealError::CardMisuse(_)));
    }
    assert_eq!(table.game.turn.actions_remaining, 3);
}

#[test]
fn test_failed_operation_leaves_state_untouched() {
    let mut table = Table::new(2);
    table.draw();
    let wildcard = table.to_hand(0, "Red / Yellow Wild Card");
    let before = serde_json::to_value(&table.game).unwrap();

    let err = table
        .game
        .play_card(table.seat(0), wildcard, PlayTarget::Property { color: Color::Green })
        .unwrap_err();
    assert!(matches!(err, DealError::IllegalWildcardColor { .. }));

    let after = serde_json::to_value(&table.game).unwrap();
    similar_asserts::assert_eq!(before, after);
}

#[test]
fn test_snapshot_json_roundtrip_keeps_shuffle() {
    let mut table = Table::dealt(2);
    let json = serde_json::to_string(&table.game).unwrap();
    let mut restored: GameState = serde_json::from_str(&json).unwrap();

    // Empty both draw piles into the discard so the next draw reshuffles
    for game in [&mut table.game, &mut restored] {
        let pile = game.draw_pile.take_all();
        game.discard_pile.cards.extend(pile);
    }
    let alice = table.seat(0);
    table.game.draw(alice).unwrap();
    restored.draw(alice).unwrap();

    assert_eq!(table.game.players[0].hand, restored.players[0].hand);
    assert_eq!(table.game.draw_pile.cards, restored.draw_pile.cards);
}
