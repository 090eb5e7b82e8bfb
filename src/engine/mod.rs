//! Turn actions: the validated entry points that mutate a match.
//!
//! Every action follows the same sequence inside one transaction:
//!
//! 1. Authenticate the caller
//! 2. Load the match and check turn ownership where the action is turn-locked
//! 3. Run the action's legality checks
//! 4. Move cards between zones
//! 5. Record events
//! 6. Run triggered effects
//! 7. Evaluate win conditions, commit, and return a result summary
//!
//! A legality failure is an `Err` and commits nothing. An effect that cannot
//! do what it says is reported inside the result; the action still commits.
//!
//! ## Key Types
//!
//! - `GameEngine`: Card data, rules and every live `Match`
//! - `Match`: State, event log and chain of one duel
//! - Result summaries: `SummonResult`, `ActivationResult`, `EndTurnResult`, ...

mod chain_ops;
mod game;
mod results;
mod spells;
mod summons;
mod turns;
mod validator;

pub use game::{GameEngine, Match};
pub use results::{
    ActivationResult, ArchivedMatch, EndTurnResult, FlipSummonResult, PhaseResult, PositionChangeResult,
    SetMonsterResult, SetSpellTrapResult, SummonResult,
};
