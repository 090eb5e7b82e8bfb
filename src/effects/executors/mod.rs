//! Effect executors: one state transition per effect category.
//!
//! Every executor takes the live `GameState`, an `ExecContext` (card data,
//! rules, the event log) and an `EffectRequest`, and returns an
//! `EffectOutcome`. Executors never return errors: an effect that cannot do
//! what it says reports `success: false` and leaves the state untouched.
//! Each state change is mirrored by an event recorded through the same
//! context, so the two commit or roll back together with the enclosing
//! turn action.
//!
//! ## Key Types
//!
//! - `EffectOutcome`: `{ success, message }`
//! - `ExecContext`: Shared read-only data plus the event log
//! - `EffectRequest`: One effect, its controller, source card and targets
//! - `EffectRunner`: The dispatch capability, injected so executors that
//!   cause follow-up triggers (destroy) can run them without depending on
//!   the dispatcher

mod destroy;
mod draw;
mod life;
mod modify;
mod movement;
mod negate;
mod summon;

pub use destroy::{execute_banish, execute_destroy};
pub use draw::{execute_discard, execute_draw, execute_mill};
pub use life::{execute_damage, execute_gain_lp};
pub use modify::{effective_attack, execute_modify_atk};
pub use movement::{execute_return_to_deck, execute_search, execute_to_graveyard, execute_to_hand};
pub use negate::execute_negate;
pub use summon::execute_special_summon;

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardRegistry};
use crate::core::{CardRef, GameState, RulesConfig, Seat};
use crate::events::{EventLog, EventType, NewEvent};

use super::effect::{Effect, Trigger};

/// Result of executing one effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOutcome {
    pub success: bool,
    pub message: String,
}

impl EffectOutcome {
    /// A successful outcome.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A soft failure.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Combine per-target outcomes: succeeds if any part succeeded.
    #[must_use]
    pub fn merge(parts: Vec<EffectOutcome>) -> Self {
        let success = parts.iter().any(|p| p.success);
        let message = parts
            .into_iter()
            .map(|p| p.message)
            .collect::<Vec<_>>()
            .join("; ");
        Self { success, message }
    }

    /// Combine per-target outcomes: succeeds only if every part succeeded.
    #[must_use]
    pub fn all(parts: Vec<EffectOutcome>) -> Self {
        let success = parts.iter().all(|p| p.success);
        Self {
            success,
            ..Self::merge(parts)
        }
    }
}

/// Everything an executor may read besides the state, plus the event log.
pub struct ExecContext<'a> {
    pub registry: &'a CardRegistry,
    pub config: &'a RulesConfig,
    pub events: &'a mut EventLog,

    /// Dispatcher used for follow-up triggers.
    pub runner: &'a dyn EffectRunner,

    /// Current trigger nesting depth.
    pub depth: usize,
}

impl<'a> ExecContext<'a> {
    /// Create a context at depth 0.
    pub fn new(
        registry: &'a CardRegistry,
        config: &'a RulesConfig,
        events: &'a mut EventLog,
        runner: &'a dyn EffectRunner,
    ) -> Self {
        Self {
            registry,
            config,
            events,
            runner,
            depth: 0,
        }
    }

    /// Append an event stamped with the state's current turn.
    pub fn record(&mut self, state: &GameState, event: NewEvent) -> u64 {
        self.events.record(state.turn_number, event)
    }

    /// Printed definition of a physical card.
    #[must_use]
    pub fn definition(&self, state: &GameState, card: CardRef) -> Option<&'a CardDefinition> {
        let registry: &'a CardRegistry = self.registry;
        state.definition_of(card).and_then(|id| registry.get(id))
    }

    /// Display name of a physical card.
    #[must_use]
    pub fn card_name(&self, state: &GameState, card: CardRef) -> String {
        self.definition(state, card)
            .map_or_else(|| "Unknown Card".to_string(), |d| d.name.clone())
    }
}

/// One effect to execute.
#[derive(Clone, Copy, Debug)]
pub struct EffectRequest<'a> {
    pub effect: &'a Effect,

    /// Seat controlling the effect.
    pub actor: Seat,

    /// Card the effect comes from, if any.
    pub source: Option<CardRef>,

    /// Chosen targets; may be empty.
    pub targets: &'a [CardRef],
}

impl<'a> EffectRequest<'a> {
    /// A request with no source and no targets.
    #[must_use]
    pub fn new(effect: &'a Effect, actor: Seat) -> Self {
        Self {
            effect,
            actor,
            source: None,
            targets: &[],
        }
    }

    #[must_use]
    pub fn from_source(mut self, source: CardRef) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: &'a [CardRef]) -> Self {
        self.targets = targets;
        self
    }

    /// Seat whose hand/deck the effect reads: the actor, or their
    /// opponent for "your opponent ..." wording.
    #[must_use]
    pub fn affected_seat(&self) -> Seat {
        if self.effect.against_opponent {
            self.actor.other()
        } else {
            self.actor
        }
    }

    /// The effect's value as a card count.
    #[must_use]
    pub fn count(&self) -> usize {
        usize::try_from(self.effect.value).unwrap_or(0)
    }
}

/// Executes one effect request against a state.
pub trait EffectRunner {
    fn run(&self, state: &mut GameState, ctx: &mut ExecContext<'_>, request: &EffectRequest<'_>) -> EffectOutcome;
}

/// Run every effect of `card`'s ability bound to `trigger`.
///
/// Each firing records an `effect_activated` event naming the trigger before
/// the effect runs. Nesting is bounded by `max_trigger_depth`; beyond it the
/// trigger is skipped with a warning.
pub fn fire_trigger(
    state: &mut GameState,
    ctx: &mut ExecContext<'_>,
    card: CardRef,
    controller: Seat,
    trigger: Trigger,
) -> Vec<EffectOutcome> {
    let Some(definition) = state.definition_of(card) else {
        return Vec::new();
    };
    let registry = ctx.registry;
    let effects: Vec<&Effect> = registry.ability(definition).triggered(trigger).map(|(_, e)| e).collect();
    if effects.is_empty() {
        return Vec::new();
    }
    if ctx.depth >= ctx.config.max_trigger_depth {
        tracing::warn!(%card, trigger = trigger.as_str(), depth = ctx.depth, "trigger depth limit reached");
        return Vec::new();
    }

    let name = registry.name_of(definition).to_string();
    let runner = ctx.runner;
    let mut outcomes = Vec::with_capacity(effects.len());
    ctx.depth += 1;
    for effect in effects {
        ctx.record(
            state,
            NewEvent::new(
                EventType::EffectActivated,
                format!("{name}'s {} effect activated", effect.kind.as_str()),
            )
            .with_seat(controller)
            .with_meta("cardId", card.raw())
            .with_meta("cardName", name.as_str())
            .with_meta("trigger", trigger.as_str())
            .with_meta("effectType", effect.kind.as_str()),
        );
        let request = EffectRequest::new(effect, controller).from_source(card);
        outcomes.push(runner.run(state, ctx, &request));
    }
    ctx.depth -= 1;
    outcomes
}

/// Run every on-resolution effect of `card`'s ability, in ability order.
pub fn run_ability(
    state: &mut GameState,
    ctx: &mut ExecContext<'_>,
    card: CardRef,
    controller: Seat,
    targets: &[CardRef],
) -> Vec<EffectOutcome> {
    let Some(definition) = state.definition_of(card) else {
        return Vec::new();
    };
    let registry = ctx.registry;
    let runner = ctx.runner;
    let mut outcomes = Vec::new();
    for (_, effect) in registry.ability(definition).on_resolution() {
        let request = EffectRequest::new(effect, controller)
            .from_source(card)
            .with_targets(targets);
        outcomes.push(runner.run(state, ctx, &request));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_merge() {
        let merged = EffectOutcome::merge(vec![
            EffectOutcome::fail("A cannot be destroyed by card effects"),
            EffectOutcome::ok("Destroyed B"),
        ]);
        assert!(merged.success);
        assert_eq!(merged.message, "A cannot be destroyed by card effects; Destroyed B");

        let none = EffectOutcome::merge(vec![EffectOutcome::fail("x")]);
        assert!(!none.success);
    }

    #[test]
    fn test_outcome_all() {
        let partial = EffectOutcome::all(vec![
            EffectOutcome::ok("Destroyed A"),
            EffectOutcome::fail("B cannot be destroyed by card effects"),
        ]);
        assert!(!partial.success);
        assert_eq!(partial.message, "Destroyed A; B cannot be destroyed by card effects");

        let every = EffectOutcome::all(vec![EffectOutcome::ok("Destroyed A"), EffectOutcome::ok("Destroyed B")]);
        assert!(every.success);
    }

    #[test]
    fn test_request_affected_seat() {
        let mut effect = Effect::new(crate::effects::EffectKind::Discard, 1);
        assert_eq!(EffectRequest::new(&effect, Seat::Host).affected_seat(), Seat::Host);

        effect.against_opponent = true;
        assert_eq!(EffectRequest::new(&effect, Seat::Host).affected_seat(), Seat::Opponent);
    }

    #[test]
    fn test_request_count_ignores_negative() {
        let effect = Effect::new(crate::effects::EffectKind::Draw, -3);
        assert_eq!(EffectRequest::new(&effect, Seat::Host).count(), 0);
    }
}
