//! Ability parser tests.
//!
//! These tests cover how card text is classified:
//! - Protection clauses and their combinations
//! - Continuous field modifiers
//! - Timing qualifiers before a colon
//! - Single-effect parsing of multi-part text

use rust_duel::effects::{parse_ability, parse_multi_part_ability, EffectKind, ModifierScope, Trigger};
use rust_duel::zones::{DeckPosition, Zone};

// ============================================================================
// Protection
// ============================================================================

/// Test that one clause can grant two protections at once.
#[test]
fn test_combined_protection_is_one_effect() {
    let parsed = parse_multi_part_ability("Cannot be destroyed by battle or card effects.");

    assert!(!parsed.has_multi_part);
    assert_eq!(parsed.effects.len(), 1);
    let effect = &parsed.effects[0];
    assert_eq!(effect.kind, EffectKind::Protection);
    assert!(effect.protection.cannot_be_destroyed_by_battle);
    assert!(effect.protection.cannot_be_destroyed_by_effects);
    assert!(!effect.protection.cannot_be_targeted);
}

/// Test protection flags gathered across several clauses.
#[test]
fn test_protection_union() {
    let parsed = parse_multi_part_ability("Cannot be targeted by card effects. Cannot be destroyed by battle.");
    let protection = parsed.protection();

    assert!(parsed.has_multi_part);
    assert!(protection.cannot_be_targeted);
    assert!(protection.cannot_be_destroyed_by_battle);
    assert!(!protection.cannot_be_destroyed_by_effects);
}

// ============================================================================
// Multi-part abilities
// ============================================================================

/// Test that clauses keep their source order.
#[test]
fn test_multi_part_order() {
    let parsed = parse_multi_part_ability("Cannot be destroyed by battle. All Dragon-Type monsters gain 500 ATK.");

    assert!(parsed.has_multi_part);
    assert_eq!(parsed.effects.len(), 2);
    assert_eq!(parsed.effects[0].kind, EffectKind::Protection);

    let boost = &parsed.effects[1];
    assert_eq!(boost.kind, EffectKind::ModifyAtk);
    assert!(boost.continuous);
    assert_eq!(boost.value, 500);
    assert_eq!(boost.condition.as_deref(), Some("dragon"));
    assert_eq!(boost.scope, ModifierScope::Field);
}

/// Test that a qualifier with a colon does not split the clause.
#[test]
fn test_embedded_trigger_is_single_effect() {
    let parsed = parse_multi_part_ability("At the start of the Battle Phase: gain 500 ATK until end of turn.");

    assert!(!parsed.has_multi_part);
    assert_eq!(parsed.effects.len(), 1);
    let effect = &parsed.effects[0];
    assert_eq!(effect.kind, EffectKind::ModifyAtk);
    assert_eq!(effect.trigger, Some(Trigger::OnBattleStart));
    assert!(effect.until_end_of_turn);
}

/// Test that flavor sentences are dropped without affecting the rest.
#[test]
fn test_flavor_sentence_dropped() {
    let parsed = parse_multi_part_ability("A fearsome beast of legend. Draw 1 card.");

    assert!(!parsed.has_multi_part);
    assert_eq!(parsed.effects.len(), 1);
    assert_eq!(parsed.effects[0].kind, EffectKind::Draw);
}

/// Test text with no mechanical content.
#[test]
fn test_unrecognized_text() {
    let parsed = parse_multi_part_ability("It sleeps beneath the mountain.");

    assert!(parsed.is_empty());
    assert!(!parsed.has_multi_part);
    assert!(parse_ability("It sleeps beneath the mountain.").is_none());
}

// ============================================================================
// Single-effect parsing
// ============================================================================

/// Test that the first action-bearing clause wins over protection.
#[test]
fn test_first_action_wins() {
    let effect = parse_ability("Cannot be destroyed by battle. Draw 2 cards.").unwrap();

    assert_eq!(effect.kind, EffectKind::Draw);
    assert_eq!(effect.value, 2);
}

/// Test that protection-only text still yields its protection.
#[test]
fn test_protection_only_falls_back() {
    let effect = parse_ability("Cannot be targeted.").unwrap();

    assert_eq!(effect.kind, EffectKind::Protection);
    assert!(effect.protection.cannot_be_targeted);
}

// ============================================================================
// Triggers and actions
// ============================================================================

/// Test the timing qualifiers the engine fires.
#[test]
fn test_timing_qualifiers() {
    let cases = [
        ("When summoned: Deal 500 damage.", Trigger::OnSummon),
        ("FLIP: Draw 1 card.", Trigger::OnFlip),
        ("During each End Phase: Gain 300 LP.", Trigger::OnEnd),
        ("When this card is destroyed: Draw 1 card.", Trigger::OnDestroy),
        ("When this card destroys a monster by battle: Deal 300 damage.", Trigger::OnBattleDestroy),
    ];
    for (text, trigger) in cases {
        let effect = parse_ability(text).unwrap();
        assert_eq!(effect.trigger, Some(trigger), "{text}");
    }
}

/// Test once-per-turn without a trigger.
#[test]
fn test_once_per_turn() {
    let effect = parse_ability("Once per turn: Draw 1 card.").unwrap();

    assert!(effect.is_opt);
    assert_eq!(effect.trigger, None);
    assert_eq!(effect.kind, EffectKind::Draw);
}

/// Test search and graveyard recursion.
#[test]
fn test_search_and_recursion() {
    let search = parse_ability("Add 1 Dragon monster from your deck to your hand.").unwrap();
    assert_eq!(search.kind, EffectKind::Search);
    assert_eq!(search.target_location, Some(Zone::Deck));
    assert_eq!(search.condition.as_deref(), Some("dragon"));

    let recursion = parse_ability("Add 1 monster from your graveyard to your hand.").unwrap();
    assert_eq!(recursion.kind, EffectKind::ToHand);
    assert_eq!(recursion.target_location, Some(Zone::Graveyard));
    assert_eq!(recursion.condition, None);
}

/// Test return-to-deck positions.
#[test]
fn test_return_to_deck_positions() {
    let top = parse_ability("Return 1 target monster to the top of its owner's deck.").unwrap();
    assert_eq!(top.kind, EffectKind::ReturnToDeck);
    assert_eq!(top.deck_position, DeckPosition::Top);

    let shuffled = parse_ability("Shuffle 1 card from your graveyard into your deck.").unwrap();
    assert_eq!(shuffled.deck_position, DeckPosition::Shuffle);
    assert_eq!(shuffled.target_location, Some(Zone::Graveyard));
}

/// Test effects aimed at the opponent's hand and deck.
#[test]
fn test_opponent_effects() {
    let discard = parse_ability("Your opponent discards 1 random card.").unwrap();
    assert_eq!(discard.kind, EffectKind::Discard);
    assert!(discard.against_opponent);

    let mill = parse_ability("Send the top 2 cards of your opponent's deck to the graveyard.").unwrap();
    assert_eq!(mill.kind, EffectKind::Mill);
    assert_eq!(mill.value, 2);
    assert!(mill.against_opponent);
}

/// Test multi-target destroy counts.
#[test]
fn test_destroy_targets() {
    let effect = parse_ability("Destroy 2 target monsters.").unwrap();
    assert_eq!(effect.kind, EffectKind::Destroy);
    assert_eq!(effect.target_count, 2);
}
