//! ATK modification.
//!
//! Three kinds of change exist, and each lives in exactly one place:
//!
//! - Permanent one-shot changes adjust `BoardCard::attack`.
//! - "Until end of turn" changes adjust `BoardCard::temp_attack`, which the
//!   end-turn sweep zeroes.
//! - Continuous field modifiers are never stored; [`effective_attack`]
//!   recomputes them from the face-up monsters on every query.

use crate::cards::CardRegistry;
use crate::core::{CardRef, GameState};
use crate::effects::ModifierScope;
use crate::events::{EventType, NewEvent};

use super::{EffectOutcome, EffectRequest, ExecContext};

/// Apply a one-shot or temporary ATK change to one monster.
///
/// Continuous modifiers report success without touching the state.
pub fn execute_modify_atk(state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome {
    let effect = request.effect;
    if effect.continuous {
        return EffectOutcome::ok("Continuous ATK modifier is active while the card is face-up");
    }

    let target = if effect.targets_self {
        request.source
    } else {
        request.targets.first().copied().or(request.source)
    };
    let Some(target) = target else {
        return EffectOutcome::fail("No target selected");
    };
    let name = ctx.card_name(state, target);
    let Some(entry) = state.board_card_mut(target) else {
        return EffectOutcome::fail(format!("{name} is not on the field"));
    };

    if effect.until_end_of_turn {
        entry.temp_attack += effect.value;
    } else {
        entry.attack = (entry.attack + effect.value).max(0);
    }
    let stored = entry.attack + entry.temp_attack;
    let controller = state.board_card(target).map_or(request.actor, |(seat, _)| seat);

    ctx.record(
        state,
        NewEvent::new(EventType::AtkModified, format!("{name}'s ATK changed by {}", effect.value))
            .with_seat(controller)
            .with_meta("cardId", target.raw())
            .with_meta("cardName", name.as_str())
            .with_meta("change", effect.value)
            .with_meta("temporary", effect.until_end_of_turn)
            .with_meta("attack", stored),
    );

    let verb = if effect.value >= 0 { "gained" } else { "lost" };
    let suffix = if effect.until_end_of_turn { " until end of turn" } else { "" };
    EffectOutcome::ok(format!("{name} {verb} {} ATK{suffix}", effect.value.abs()))
}

/// Current ATK of a monster on the field, including temporary bonuses and
/// every standing modifier from face-up monsters. Never negative.
///
/// Returns `None` if the card is not on the field.
#[must_use]
pub fn effective_attack(state: &GameState, registry: &CardRegistry, card: CardRef) -> Option<i64> {
    let (controller, entry) = state.board_card(card)?;
    let definition = state.definition_of(card).and_then(|id| registry.get(id));

    let mut attack = entry.attack + entry.temp_attack;
    for (source_seat, slot) in state.players.iter() {
        for source in slot.board.iter().filter(|b| !b.is_face_down()) {
            if state.negated.contains(&source.card) {
                continue;
            }
            let Some(source_def) = state.definition_of(source.card) else {
                continue;
            };
            for modifier in registry.ability(source_def).continuous_modifiers() {
                if modifier.scope == ModifierScope::Controller && source_seat != controller {
                    continue;
                }
                let applies = match (modifier.condition.as_deref(), definition) {
                    (None, _) => true,
                    (Some(condition), Some(def)) => def.matches_condition(condition),
                    (Some(_), None) => false,
                };
                if applies {
                    attack += modifier.value;
                }
            }
        }
    }
    Some(attack.max(0))
}
