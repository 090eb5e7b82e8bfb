//! Deck and hand executors: draw, mill, discard.

use serde_json::json;

use crate::core::{CardRef, GameState, Seat};
use crate::events::{EventType, NewEvent};
use crate::zones::{DeckPosition, Pile, Zone};

use super::{EffectOutcome, ExecContext};

/// Draw up to `count` cards from the top of `seat`'s deck.
///
/// A short deck is not a failure: the outcome reports how many cards were
/// actually drawn. Deck-out is judged by the turn loop.
pub fn execute_draw(state: &mut GameState, ctx: &mut ExecContext<'_>, seat: Seat, count: usize) -> EffectOutcome {
    let mut drawn: Vec<CardRef> = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(card) = state.slot_mut(seat).pop_deck() else {
            break;
        };
        state.slot_mut(seat).hand.push_back(card);
        drawn.push(card);
    }

    let raw: Vec<u32> = drawn.iter().map(|c| c.raw()).collect();
    ctx.record(
        state,
        NewEvent::new(EventType::CardDrawn, format!("{seat} drew {} card(s)", drawn.len()))
            .with_seat(seat)
            .with_meta("requested", count)
            .with_meta("count", drawn.len())
            .with_meta("cards", json!(raw)),
    );

    if drawn.len() < count {
        tracing::debug!(%seat, requested = count, drawn = drawn.len(), "deck ran out while drawing");
        EffectOutcome::ok(format!("Drew {} of {count} card(s) (deck empty)", drawn.len()))
    } else {
        EffectOutcome::ok(format!("Drew {count} card(s)"))
    }
}

/// Send up to `count` cards from the top of `seat`'s deck to the graveyard.
pub fn execute_mill(state: &mut GameState, ctx: &mut ExecContext<'_>, seat: Seat, count: usize) -> EffectOutcome {
    if state.slot(seat).deck.is_empty() {
        return EffectOutcome::fail("No cards left in deck to mill");
    }

    let mut milled = 0;
    for _ in 0..count {
        let Some(card) = state.slot_mut(seat).pop_deck() else {
            break;
        };
        state.slot_mut(seat).graveyard.push_back(card);
        milled += 1;

        let name = ctx.card_name(state, card);
        ctx.record(
            state,
            NewEvent::new(EventType::CardToGraveyard, format!("{name} was sent from the deck to the graveyard"))
                .with_seat(seat)
                .with_meta("cardId", card.raw())
                .with_meta("cardName", name)
                .with_meta("from", Zone::Deck.as_str())
                .with_meta("reason", "mill"),
        );
    }

    if milled < count {
        EffectOutcome::ok(format!("Milled {milled} of {count} card(s) (deck empty)"))
    } else {
        EffectOutcome::ok(format!("Milled {count} card(s)"))
    }
}

/// Discard `count` cards from `seat`'s hand.
///
/// Explicit targets are filtered to those actually in the hand. With no
/// targets, cards are chosen uniformly at random.
pub fn execute_discard(
    state: &mut GameState,
    ctx: &mut ExecContext<'_>,
    seat: Seat,
    count: usize,
    targets: &[CardRef],
) -> EffectOutcome {
    let hand = &state.slot(seat).hand;
    let chosen: Vec<CardRef> = if targets.is_empty() {
        let mut pool: Vec<CardRef> = hand.iter().copied().collect();
        state.rng.shuffle(&mut pool);
        pool.truncate(count);
        pool
    } else {
        targets
            .iter()
            .copied()
            .filter(|card| hand.contains(card))
            .take(count)
            .collect()
    };

    if chosen.is_empty() {
        return EffectOutcome::fail("No cards in hand to discard");
    }

    for &card in &chosen {
        state.move_to_pile(card, Pile::Graveyard, DeckPosition::Top);
        let name = ctx.card_name(state, card);
        ctx.record(
            state,
            NewEvent::new(EventType::CardDiscarded, format!("{name} was discarded"))
                .with_seat(seat)
                .with_meta("cardId", card.raw())
                .with_meta("cardName", name),
        );
    }

    if chosen.len() < count {
        EffectOutcome::ok(format!("Discarded {} of {count} card(s)", chosen.len()))
    } else {
        EffectOutcome::ok(format!("Discarded {count} card(s)"))
    }
}
