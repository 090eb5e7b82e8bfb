//! Card movement executors: to hand, to graveyard, return to deck, search.
//!
//! Every move is a single `GameState::move_to_pile` call, which removes the
//! card from its current zone and pushes it onto its owner's pile.

use crate::core::{CardRef, GameState, Seat};
use crate::events::{EventType, NewEvent};
use crate::zones::{DeckPosition, Pile, Zone};

use super::{EffectOutcome, EffectRequest, ExecContext};

/// Explicit targets in `seat`'s `zone`, or else the first cards there that
/// satisfy the effect's condition.
fn candidates(
    state: &GameState,
    ctx: &ExecContext<'_>,
    request: &EffectRequest<'_>,
    seat: Seat,
    zone: Zone,
) -> Vec<CardRef> {
    let limit = request.effect.target_count.max(1) as usize;
    let slot = state.slot(seat);
    if !request.targets.is_empty() {
        return request
            .targets
            .iter()
            .copied()
            .filter(|card| slot.contains(zone, *card))
            .take(limit)
            .collect();
    }

    slot.cards_in(zone)
        .into_iter()
        .filter(|card| match request.effect.condition.as_deref() {
            Some(condition) => ctx
                .definition(state, *card)
                .is_some_and(|d| d.matches_condition(condition)),
            None => true,
        })
        .take(limit)
        .collect()
}

/// Human wording for a source zone.
fn zone_phrase(zone: Zone) -> &'static str {
    match zone {
        Zone::Board | Zone::SpellTrap => "field",
        Zone::Hand => "hand",
        Zone::Graveyard => "graveyard",
        Zone::Deck => "deck",
        Zone::Banished => "banished zone",
    }
}

fn record_to_hand(state: &GameState, ctx: &mut ExecContext<'_>, seat: Seat, card: CardRef, from: Zone) -> String {
    let name = ctx.card_name(state, card);
    ctx.record(
        state,
        NewEvent::new(EventType::CardToHand, format!("{name} was added to the hand from the {}", zone_phrase(from)))
            .with_seat(seat)
            .with_meta("cardId", card.raw())
            .with_meta("cardName", name.as_str())
            .with_meta("from", from.as_str()),
    );
    name
}

/// Add cards to their owner's hand.
///
/// Reads the actor's graveyard by default; with `target_location` set to
/// the board it returns targeted monsters from either side.
pub fn execute_to_hand(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    let zone = request.effect.target_location.unwrap_or(Zone::Graveyard);

    let cards: Vec<CardRef> = if zone == Zone::Board {
        if request.targets.is_empty() {
            return EffectOutcome::fail("No target selected");
        }
        let limit = request.effect.target_count.max(1) as usize;
        request
            .targets
            .iter()
            .copied()
            .filter(|card| state.board_card(*card).is_some())
            .take(limit)
            .collect()
    } else {
        candidates(state, ctx, request, request.actor, zone)
    };

    if cards.is_empty() {
        return EffectOutcome::fail(format!("No valid card found in the {}", zone_phrase(zone)));
    }

    let mut names = Vec::with_capacity(cards.len());
    for card in cards {
        let Some(from) = state.move_to_pile(card, Pile::Hand, DeckPosition::Top) else {
            continue;
        };
        let owner = state.owner_of(card).unwrap_or(request.actor);
        names.push(record_to_hand(state, ctx, owner, card, from));
    }
    EffectOutcome::ok(format!("Added {} to hand", names.join(", ")))
}

/// Search the actor's deck for matching cards, add them to the hand and
/// shuffle the deck.
pub fn execute_search(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    let seat = request.actor;
    let cards = candidates(state, ctx, request, seat, Zone::Deck);
    if cards.is_empty() {
        return EffectOutcome::fail("No matching card found in your deck");
    }

    let mut names = Vec::with_capacity(cards.len());
    for card in cards {
        state.move_to_pile(card, Pile::Hand, DeckPosition::Top);
        names.push(record_to_hand(state, ctx, seat, card, Zone::Deck));
    }
    state.shuffle_deck(seat);
    ctx.record(
        state,
        NewEvent::new(EventType::DeckSearched, format!("{seat} searched their deck"))
            .with_seat(seat)
            .with_meta("count", names.len())
            .with_meta("condition", request.effect.condition.clone().unwrap_or_default()),
    );
    EffectOutcome::ok(format!("Added {} from deck to hand", names.join(", ")))
}

/// Send cards to their owner's graveyard without destroying them.
pub fn execute_to_graveyard(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    let cards: Vec<CardRef> = match request.effect.target_location {
        Some(zone) if request.targets.is_empty() => candidates(state, ctx, request, request.actor, zone),
        _ => {
            let limit = request.effect.target_count.max(1) as usize;
            request
                .targets
                .iter()
                .copied()
                .filter(|card| matches!(state.locate(*card), Some((_, zone)) if zone != Zone::Graveyard))
                .take(limit)
                .collect()
        }
    };
    if cards.is_empty() {
        return EffectOutcome::fail("No target selected");
    }

    let mut names = Vec::with_capacity(cards.len());
    for card in cards {
        let Some(from) = state.move_to_pile(card, Pile::Graveyard, DeckPosition::Top) else {
            continue;
        };
        let name = ctx.card_name(state, card);
        let owner = state.owner_of(card).unwrap_or(request.actor);
        ctx.record(
            state,
            NewEvent::new(EventType::CardToGraveyard, format!("{name} was sent to the graveyard"))
                .with_seat(owner)
                .with_meta("cardId", card.raw())
                .with_meta("cardName", name.as_str())
                .with_meta("from", from.as_str())
                .with_meta("reason", "effect"),
        );
        names.push(name);
    }
    EffectOutcome::ok(format!("Sent {} to the graveyard", names.join(", ")))
}

/// Return targets from the field, hand or graveyard to their owner's deck.
pub fn execute_return_to_deck(
    state: &mut GameState,
    ctx: &mut ExecContext<'_>,
    request: &EffectRequest<'_>,
) -> EffectOutcome {
    let Some(&target) = request.targets.first() else {
        return EffectOutcome::fail("No target selected");
    };
    let expected = request.effect.target_location.unwrap_or(Zone::Board);
    let not_found = || {
        EffectOutcome::fail(match expected {
            Zone::Hand => "Card not found in hand",
            Zone::Graveyard => "Card not found in graveyard",
            _ => "Card not found on field",
        })
    };

    let Some((_, zone)) = state.locate(target) else {
        return not_found();
    };
    let zone_matches = match expected {
        Zone::Board | Zone::SpellTrap => matches!(zone, Zone::Board | Zone::SpellTrap),
        other => zone == other,
    };
    if !zone_matches {
        return not_found();
    }

    let position = request.effect.deck_position;
    state.move_to_pile(target, Pile::Deck, position);

    let name = ctx.card_name(state, target);
    let owner = state.owner_of(target).unwrap_or(request.actor);
    let message = match position {
        DeckPosition::Shuffle => format!("Returned {name} from {} to deck and shuffled", zone_phrase(zone)),
        placed => format!("Returned {name} from {} to deck ({})", zone_phrase(zone), placed.as_str()),
    };
    ctx.record(
        state,
        NewEvent::new(EventType::CardReturnedToDeck, message.clone())
            .with_seat(owner)
            .with_meta("cardId", target.raw())
            .with_meta("cardName", name.as_str())
            .with_meta("from", zone.as_str())
            .with_meta("position", position.as_str()),
    );
    EffectOutcome::ok(message)
}
