//! Effect system: parsed abilities and their execution.
//!
//! - `parser`: Free-text ability → `ParsedAbility` (one `Effect` per clause)
//! - `executors`: One state transition per effect kind
//! - `EffectResolver`: Common checks (negation, once-per-turn, targeting)
//!   followed by dispatch to an executor
//!
//! ## Design Philosophy
//!
//! Parsing happens once per card definition, when it is registered. At
//! runtime the engine only deals in structured `Effect`s. Executors report
//! soft failures as `EffectOutcome` values and never abort the turn action
//! that triggered them.

mod effect;
pub mod executors;
mod parser;
mod resolver;

pub use effect::{Effect, EffectKind, ModifierScope, ParsedAbility, Trigger};
pub use executors::{
    effective_attack, fire_trigger, run_ability, EffectOutcome, EffectRequest, EffectRunner, ExecContext,
};
pub use parser::{parse_ability, parse_multi_part_ability};
pub use resolver::EffectResolver;
