//! Property tests over random action sequences.
//!
//! Whatever players try, a match must keep these properties:
//! - Every card sits in exactly one zone
//! - A rejected action leaves state and events untouched
//! - Life points never go negative
//! - The event log only grows, in sequence order
//! - A resolved Spell or Trap link leaves its card in its owner's graveyard

use proptest::prelude::*;

use rust_duel::cards::{CardDefinition, CardId, CardRegistry, CardType};
use rust_duel::chain::LinkResolution;
use rust_duel::core::{Caller, CardRef, GameId, LobbyId, RulesConfig, Seat, UserId};
use rust_duel::engine::GameEngine;
use rust_duel::zones::Stance;

fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    let cards = [
        CardDefinition::new(CardId::new(1), "Inferno Drake", CardType::Creature)
            .with_stats(1800, 1200)
            .with_level(4)
            .with_ability("When summoned: Deal 500 damage."),
        CardDefinition::new(CardId::new(2), "Martyr Imp", CardType::Creature)
            .with_stats(600, 600)
            .with_level(3)
            .with_ability("When this card is destroyed: Draw 1 card."),
        CardDefinition::new(CardId::new(3), "Storm Titan", CardType::Creature)
            .with_stats(2400, 1800)
            .with_level(6),
        CardDefinition::new(CardId::new(4), "Shatter", CardType::Spell).with_ability("Destroy 1 target monster."),
        CardDefinition::new(CardId::new(5), "Pot of Plenty", CardType::Spell).with_ability("Draw 2 cards."),
        CardDefinition::new(CardId::new(6), "Grave Call", CardType::Spell)
            .with_ability("Special Summon 1 monster from your graveyard."),
        CardDefinition::new(CardId::new(7), "Ambush Snare", CardType::Trap)
            .with_ability("Your opponent discards 1 random card."),
        CardDefinition::new(CardId::new(8), "Undertow", CardType::Trap)
            .with_ability("Return 1 target monster to the top of its owner's deck."),
    ];
    for card in cards {
        registry.register(card);
    }
    registry
}

fn deck() -> Vec<CardId> {
    (0..16).map(|i| CardId::new(i % 8 + 1)).collect()
}

#[derive(Clone, Copy, Debug)]
enum Move {
    Summon,
    Set,
    SetSpellTrap,
    ActivateSpell,
    ActivateTrap,
    Chain,
    Advance,
    EndTurn,
}

fn any_move() -> impl Strategy<Value = (Move, usize, bool)> {
    let kind = prop_oneof![
        Just(Move::Summon),
        Just(Move::Set),
        Just(Move::SetSpellTrap),
        Just(Move::ActivateSpell),
        Just(Move::ActivateTrap),
        Just(Move::Chain),
        Just(Move::Advance),
        Just(Move::EndTurn),
    ];
    (kind, 0usize..8, any::<bool>())
}

/// Pick the `index`th card (wrapping) from a list, if any.
fn pick(cards: &[CardRef], index: usize) -> Option<CardRef> {
    (!cards.is_empty()).then(|| cards[index % cards.len()])
}

/// Apply one move. Returns the links resolved by a `Chain` move.
fn play(
    engine: &mut GameEngine,
    lobby: &LobbyId,
    (kind, index, acting_player): (Move, usize, bool),
) -> Vec<LinkResolution> {
    let state = engine.state(lobby).unwrap();
    let seat = if acting_player {
        state.current_turn
    } else {
        state.current_turn.other()
    };
    let caller = Caller::user(if seat == Seat::Host { "alice" } else { "bob" });
    let slot = state.slot(seat);
    let hand: Vec<CardRef> = slot.hand.iter().copied().collect();
    let board: Vec<CardRef> = slot.board.iter().map(|b| b.card).collect();
    let enemy: Vec<CardRef> = state.slot(seat.other()).board.iter().map(|b| b.card).collect();
    let zone: Vec<CardRef> = slot.spell_trap_zone.iter().map(|z| z.card).collect();
    let chainable: Vec<CardRef> = hand.iter().chain(&zone).chain(&board).copied().collect();

    let tributes: Vec<CardRef> = board.iter().copied().take(index % 3).collect();
    let targets: Vec<CardRef> = pick(&enemy, index).into_iter().collect();

    let mut resolved = Vec::new();
    let _ = match kind {
        Move::Summon => pick(&hand, index)
            .map(|card| engine.normal_summon(&caller, lobby, card, &tributes, Stance::Attack).map(drop)),
        Move::Set => pick(&hand, index).map(|card| engine.set_monster(&caller, lobby, card, &tributes).map(drop)),
        Move::SetSpellTrap => pick(&hand, index).map(|card| engine.set_spell_trap(&caller, lobby, card).map(drop)),
        Move::ActivateSpell => {
            pick(&hand, index).map(|card| engine.activate_spell(&caller, lobby, card, &targets).map(drop))
        }
        Move::ActivateTrap => {
            pick(&zone, index).map(|card| engine.activate_trap(&caller, lobby, card, &targets).map(drop))
        }
        Move::Chain => pick(&chainable, index).map(|card| {
            engine.add_to_chain(&caller, lobby, card, &targets)?;
            let other = Caller::user(if seat == Seat::Host { "bob" } else { "alice" });
            engine.pass_priority(&other, lobby)?;
            engine.pass_priority(&caller, lobby)?;
            resolved = engine.resolve_chain(&caller, lobby)?;
            Ok(())
        }),
        Move::Advance => Some(engine.advance_phase(&caller, lobby).map(drop)),
        Move::EndTurn => Some(engine.end_turn(&caller, lobby).map(drop)),
    };
    resolved
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Zones stay consistent and failed actions change nothing.
    #[test]
    fn test_random_play_keeps_invariants(
        seed in any::<u64>(),
        moves in prop::collection::vec(any_move(), 1..60),
    ) {
        let registry = registry();
        let mut engine = GameEngine::new(registry.clone(), RulesConfig::default());
        let lobby = LobbyId::new("fuzz");
        engine
            .create_match(lobby.clone(), GameId::new("g"), UserId::new("alice"), UserId::new("bob"), &deck(), &deck(), seed)
            .unwrap();

        for action in moves {
            let before = engine.get_match(&lobby).unwrap().clone();
            let resolved = play(&mut engine, &lobby, action);
            let after = engine.get_match(&lobby).unwrap();

            prop_assert!(after.state.audit_zones().is_ok());
            for link in &resolved {
                let id = after.state.definition_of(link.card).unwrap();
                if !registry.get(id).unwrap().card_type.is_monster() {
                    let owner = after.state.owner_of(link.card).unwrap();
                    prop_assert!(after.state.slot(owner).graveyard.contains(&link.card));
                }
            }
            if after.chain.is_empty() {
                prop_assert!(after.state.chained.is_empty());
            }
            for seat in Seat::BOTH {
                prop_assert!(after.state.slot(seat).life_points >= 0);
            }
            prop_assert!(after.events.len() >= before.events.len());
            let sequences: Vec<u64> = after.events.iter().map(|e| e.sequence).collect();
            prop_assert!(sequences.windows(2).all(|w| w[1] == w[0] + 1));

            if after.events.len() == before.events.len() {
                prop_assert_eq!(&after.state, &before.state);
            }
        }
    }
}
