//! Negation.

use crate::core::GameState;
use crate::events::{EventType, NewEvent};

use super::{EffectOutcome, EffectRequest, ExecContext};

/// Negate the effects of the first target until the end of the turn.
///
/// A negated card's continuous modifiers stop applying and any chain link
/// it sourced resolves as a failure.
pub fn execute_negate(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    let Some(&target) = request.targets.first() else {
        return EffectOutcome::fail("No effect to negate");
    };
    if state.instance(target).is_none() {
        return EffectOutcome::fail("Card not found");
    }

    let name = ctx.card_name(state, target);
    state.negated.insert(target);
    ctx.record(
        state,
        NewEvent::new(EventType::EffectNegated, format!("{name}'s effect was negated"))
            .with_seat(request.actor)
            .with_meta("cardId", target.raw())
            .with_meta("cardName", name.as_str()),
    );
    EffectOutcome::ok(format!("Negated {name}'s effect"))
}
