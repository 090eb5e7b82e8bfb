//! # rust-duel
//!
//! Rules engine for a two-player trading card game with monsters, spells,
//! traps and chains.
//!
//! ## Design Principles
//!
//! 1. **Text In, Structure Out**: Card abilities are written in plain
//!    English. They are parsed once, at registration, into structured
//!    `Effect`s; nothing at runtime inspects ability text.
//!
//! 2. **One Action, One Transaction**: Every turn action runs against an
//!    O(1) copy of the match (`im-rs`) and commits state, events and chain
//!    together, or not at all.
//!
//! 3. **Two-Tier Failures**: Rule violations are `EngineError`s and change
//!    nothing. Effects that fizzle are `EffectOutcome`s reported inside an
//!    otherwise successful action.
//!
//! ## Modules
//!
//! - `core`: IDs, seats, rules configuration, RNG, game state, errors
//! - `zones`: Per-seat zones and field entries
//! - `cards`: Card definitions, instances and the registry
//! - `effects`: Ability parser, effect executors and the dispatcher
//! - `chain`: LIFO chain with two-player priority
//! - `events`: Append-only event log
//! - `engine`: `GameEngine` and its turn actions

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod chain;
pub mod events;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Caller, CardRef, EngineError, GameId, GameRng, GameState, LobbyId, MatchStatus, Phase, Result, RulesConfig,
    Seat, Seats, UserId, WinReason,
};

pub use crate::zones::{BoardCard, DeckPosition, Orientation, PlayerSlot, Protection, Stance, Zone, ZoneCard};

pub use crate::cards::{Archetype, CardDefinition, CardId, CardInstance, CardRegistry, CardType};

pub use crate::effects::{
    parse_ability, parse_multi_part_ability, Effect, EffectKind, EffectOutcome, EffectResolver, ParsedAbility,
    Trigger,
};

pub use crate::chain::{Chain, ChainLink, ChainLinkId, ChainState, LinkResolution, ResolutionStatus};

pub use crate::events::{EventBatch, EventLog, EventStats, EventType, GameEvent, NewEvent};

pub use crate::engine::{
    ActivationResult, ArchivedMatch, EndTurnResult, FlipSummonResult, GameEngine, Match, PhaseResult,
    PositionChangeResult, SetMonsterResult, SetSpellTrapResult, SummonResult,
};
