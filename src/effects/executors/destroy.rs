//! Removal executors: destroy and banish.
//!
//! Destroy honors `cannot_be_destroyed_by_effects` and then fires the
//! destroyed card's `on_destroy` effects through the injected runner.
//! A multi-target removal succeeds only if every target was removed.

use crate::core::{CardRef, GameState};
use crate::effects::Trigger;
use crate::events::{EventType, NewEvent};
use crate::zones::{DeckPosition, Pile, Zone};

use super::{fire_trigger, EffectOutcome, EffectRequest, ExecContext};

/// Destroy up to `target_count` targets on either side of the field.
pub fn execute_destroy(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    let limit = request.effect.target_count.max(1) as usize;
    if request.targets.is_empty() {
        return EffectOutcome::fail("No target selected");
    }

    let parts: Vec<EffectOutcome> = request
        .targets
        .iter()
        .take(limit)
        .map(|&target| destroy_one(state, ctx, target))
        .collect();
    EffectOutcome::all(parts)
}

fn destroy_one(state: &mut GameState, ctx: &mut ExecContext<'_>, target: CardRef) -> EffectOutcome {
    let name = ctx.card_name(state, target);
    let Some((holder, zone)) = state.locate(target) else {
        return EffectOutcome::fail(format!("{name} is not on the field"));
    };
    if !matches!(zone, Zone::Board | Zone::SpellTrap) {
        return EffectOutcome::fail(format!("{name} is not on the field"));
    }
    if let Some((_, entry)) = state.board_card(target) {
        if entry.protection.cannot_be_destroyed_by_effects {
            tracing::debug!(card = %name, "destroy blocked by protection");
            return EffectOutcome::fail(format!("{name} cannot be destroyed by card effects"));
        }
    }

    state.move_to_pile(target, Pile::Graveyard, DeckPosition::Top);
    ctx.record(
        state,
        NewEvent::new(EventType::CardToGraveyard, format!("{name} was destroyed"))
            .with_seat(holder)
            .with_meta("cardId", target.raw())
            .with_meta("cardName", name.as_str())
            .with_meta("from", zone.as_str())
            .with_meta("reason", "effect_destroy"),
    );

    let owner = state.owner_of(target).unwrap_or(holder);
    let triggered = fire_trigger(state, ctx, target, owner, Trigger::OnDestroy);
    if triggered.is_empty() {
        EffectOutcome::ok(format!("Destroyed {name}"))
    } else {
        let follow_up = EffectOutcome::merge(triggered);
        EffectOutcome::ok(format!("Destroyed {name} ({})", follow_up.message))
    }
}

/// Banish up to `target_count` targets from the field, hand or graveyard.
///
/// With a `target_location`, only cards in that zone may be banished.
pub fn execute_banish(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    if request.targets.is_empty() {
        return EffectOutcome::fail("No target selected");
    }
    let limit = request.effect.target_count.max(1) as usize;

    let parts = request
        .targets
        .iter()
        .take(limit)
        .map(|&target| {
            let name = ctx.card_name(state, target);
            let Some((holder, zone)) = state.locate(target) else {
                return EffectOutcome::fail(format!("{name} was not found"));
            };
            if zone == Zone::Banished || zone == Zone::Deck {
                return EffectOutcome::fail(format!("{name} cannot be banished from the {zone}"));
            }
            if let Some(wanted) = request.effect.target_location.filter(|wanted| *wanted != zone) {
                return EffectOutcome::fail(format!("{name} is not in the {wanted}"));
            }

            state.move_to_pile(target, Pile::Banished, DeckPosition::Top);
            ctx.record(
                state,
                NewEvent::new(EventType::CardBanished, format!("{name} was banished"))
                    .with_seat(holder)
                    .with_meta("cardId", target.raw())
                    .with_meta("cardName", name.as_str())
                    .with_meta("from", zone.as_str()),
            );
            EffectOutcome::ok(format!("Banished {name}"))
        })
        .collect();
    EffectOutcome::all(parts)
}
