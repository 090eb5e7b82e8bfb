//! Special Summon.
//!
//! A Special Summon ignores the once-per-turn Normal Summon limit but still
//! needs a free monster zone. The monster enters face-up in Attack Position
//! with protection flags taken from its parsed ability, and its
//! `on_summon` effects fire.

use crate::core::{CardRef, GameState};
use crate::effects::Trigger;
use crate::events::{EventType, NewEvent};
use crate::zones::{BoardCard, Stance, Zone};

use super::{fire_trigger, EffectOutcome, EffectRequest, ExecContext};

pub fn execute_special_summon(
    state: &mut GameState,
    ctx: &mut ExecContext<'_>,
    request: &EffectRequest<'_>,
) -> EffectOutcome {
    let seat = request.actor;
    let zone = request.effect.target_location.unwrap_or(Zone::Hand);

    let max = ctx.config.max_monster_zones;
    if state.slot(seat).board.len() >= max {
        return EffectOutcome::fail(format!("{} is full (max {max} cards)", Zone::Board));
    }

    let Some(card) = summon_candidate(state, ctx, request, zone) else {
        return EffectOutcome::fail(format!("No monster available to Special Summon from your {zone}"));
    };
    let Some(definition) = ctx.definition(state, card) else {
        return EffectOutcome::fail("Card definition not found");
    };
    if !definition.card_type.is_monster() {
        return EffectOutcome::fail(format!("{} is not a monster", definition.name));
    }
    let Some(from) = state.slot_mut(seat).take(card) else {
        return EffectOutcome::fail(format!("{} is not in your {zone}", definition.name));
    };

    let protection = ctx.registry.ability(definition.id).protection();
    let entry = BoardCard::face_up(card, Stance::Attack, definition.attack, definition.defense, state.turn_number)
        .with_protection(protection);
    state.slot_mut(seat).place_monster(entry);

    ctx.record(
        state,
        NewEvent::new(EventType::SpecialSummon, format!("{} was Special Summoned", definition.name))
            .with_seat(seat)
            .with_meta("cardId", card.raw())
            .with_meta("cardName", definition.name.as_str())
            .with_meta("from", from.as_str())
            .with_meta("position", Stance::Attack.as_str()),
    );

    let triggered = fire_trigger(state, ctx, card, seat, Trigger::OnSummon);
    if triggered.is_empty() {
        EffectOutcome::ok(format!("Special Summoned {}", definition.name))
    } else {
        let follow_up = EffectOutcome::merge(triggered);
        EffectOutcome::ok(format!("Special Summoned {} ({})", definition.name, follow_up.message))
    }
}

/// The source card for "Special Summon this card", an explicit target, or
/// the first matching monster in the actor's `zone`.
fn summon_candidate(
    state: &GameState,
    ctx: &ExecContext<'_>,
    request: &EffectRequest<'_>,
    zone: Zone,
) -> Option<CardRef> {
    let slot = state.slot(request.actor);
    if request.effect.targets_self {
        return request.source.filter(|card| slot.zone_of(*card).is_some_and(|z| z != Zone::Board));
    }
    if let Some(&target) = request.targets.first() {
        return slot.contains(zone, target).then_some(target);
    }

    slot.cards_in(zone).into_iter().find(|card| {
        ctx.definition(state, *card).is_some_and(|d| {
            d.card_type.is_monster()
                && request
                    .effect
                    .condition
                    .as_deref()
                    .map_or(true, |condition| d.matches_condition(condition))
        })
    })
}
