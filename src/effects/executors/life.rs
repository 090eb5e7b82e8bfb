//! Life point executors.
//!
//! Life points never drop below zero. Executors only move the number; the
//! engine decides when a zero total ends the match.

use crate::core::{GameState, Seat};
use crate::events::{EventType, NewEvent};

use super::{EffectOutcome, ExecContext};

/// Deal `amount` damage to the opponent of `actor`.
pub fn execute_damage(state: &mut GameState, ctx: &mut ExecContext<'_>, actor: Seat, amount: i64) -> EffectOutcome {
    let target = actor.other();
    let (previous, current) = change_life_points(state, ctx, target, -amount.max(0));
    EffectOutcome::ok(format!("Dealt {amount} damage to {target} ({previous} -> {current} LP)"))
}

/// `actor` gains `amount` life points.
pub fn execute_gain_lp(state: &mut GameState, ctx: &mut ExecContext<'_>, actor: Seat, amount: i64) -> EffectOutcome {
    let (previous, current) = change_life_points(state, ctx, actor, amount.max(0));
    EffectOutcome::ok(format!("{actor} gained {amount} LP ({previous} -> {current} LP)"))
}

fn change_life_points(state: &mut GameState, ctx: &mut ExecContext<'_>, seat: Seat, delta: i64) -> (i64, i64) {
    let slot = state.slot_mut(seat);
    let previous = slot.life_points;
    let current = (previous + delta).max(0);
    slot.life_points = current;

    let description = if delta < 0 {
        format!("{seat} took {} damage", -delta)
    } else {
        format!("{seat} gained {delta} LP")
    };
    ctx.record(
        state,
        NewEvent::new(EventType::LpChanged, description)
            .with_seat(seat)
            .with_meta("previousLP", previous)
            .with_meta("newLP", current)
            .with_meta("change", current - previous),
    );
    (previous, current)
}
