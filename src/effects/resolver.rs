//! Effect resolution: routing one effect to its executor.
//!
//! `EffectResolver` is the crate's `EffectRunner`. Before dispatching it
//! applies the checks common to every effect kind:
//!
//! 1. A negated source card does nothing.
//! 2. A once-per-turn effect fails if its source already used it this turn.
//! 3. Targets on the field with `cannot_be_targeted` are rejected.
//!
//! All three are soft failures; the caller's action still commits.

use crate::core::GameState;

use super::effect::EffectKind;
use super::executors::{
    execute_banish, execute_damage, execute_destroy, execute_discard, execute_draw, execute_gain_lp,
    execute_mill, execute_modify_atk, execute_negate, execute_return_to_deck, execute_search,
    execute_special_summon, execute_to_graveyard, execute_to_hand, EffectOutcome, EffectRequest,
    EffectRunner, ExecContext,
};

/// Dispatches effects to executors.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectResolver;

impl EffectResolver {
    /// Create a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn precheck(state: &GameState, ctx: &ExecContext<'_>, request: &EffectRequest<'_>) -> Option<EffectOutcome> {
        if let Some(source) = request.source {
            if state.negated.contains(&source) {
                let name = ctx.card_name(state, source);
                return Some(EffectOutcome::fail(format!("{name}'s effect is negated")));
            }
            if request.effect.is_opt && state.opt_used.contains(&source) {
                let name = ctx.card_name(state, source);
                return Some(EffectOutcome::fail(format!(
                    "{name}'s effect can only be used once per turn"
                )));
            }
        }

        request.targets.iter().find_map(|&target| {
            let (_, entry) = state.board_card(target)?;
            entry.protection.cannot_be_targeted.then(|| {
                let name = ctx.card_name(state, target);
                EffectOutcome::fail(format!("{name} cannot be targeted"))
            })
        })
    }

    fn dispatch(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
        let effect = request.effect;
        match effect.kind {
            EffectKind::Draw => execute_draw(state, ctx, request.affected_seat(), request.count()),
            EffectKind::Mill => execute_mill(state, ctx, request.affected_seat(), request.count()),
            EffectKind::Discard => {
                execute_discard(state, ctx, request.affected_seat(), request.count(), request.targets)
            }
            EffectKind::Destroy => execute_destroy(state, ctx, request),
            EffectKind::Banish => execute_banish(state, ctx, request),
            EffectKind::Damage => execute_damage(state, ctx, request.actor, effect.value),
            EffectKind::GainLp => execute_gain_lp(state, ctx, request.actor, effect.value),
            EffectKind::ToHand => execute_to_hand(state, ctx, request),
            EffectKind::Search => execute_search(state, ctx, request),
            EffectKind::ToGraveyard => execute_to_graveyard(state, ctx, request),
            EffectKind::ReturnToDeck => execute_return_to_deck(state, ctx, request),
            EffectKind::ModifyAtk => execute_modify_atk(state, ctx, request),
            EffectKind::Summon => execute_special_summon(state, ctx, request),
            EffectKind::Negate => execute_negate(state, ctx, request),
            EffectKind::Protection => EffectOutcome::ok("Protection applies while the card is on the field"),
        }
    }
}

impl EffectRunner for EffectResolver {
    fn run(&self, state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
        if let Some(rejected) = Self::precheck(state, ctx, request) {
            tracing::warn!(kind = request.effect.kind.as_str(), message = %rejected.message, "effect rejected");
            return rejected;
        }

        let outcome = Self::dispatch(state, ctx, request);
        if outcome.success {
            tracing::debug!(kind = request.effect.kind.as_str(), message = %outcome.message, "effect applied");
            // Only a resolved effect uses up the once-per-turn allowance.
            if let (true, Some(source)) = (request.effect.is_opt, request.source) {
                state.opt_used.insert(source);
            }
        } else {
            tracing::warn!(kind = request.effect.kind.as_str(), message = %outcome.message, "effect failed");
        }
        outcome
    }
}
