//! Core engine types: identifiers, seats, configuration, RNG, state, errors.
//!
//! This module contains the fundamental building blocks every other module
//! depends on. Rule constants live in `RulesConfig` rather than in code.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{CardRef, GameId, LobbyId};
pub use player::{Caller, Seat, Seats, UserId};
pub use rng::{GameRng, GameRngState};
pub use config::{Phase, RulesConfig, TributeTier};
pub use error::{EngineError, ErrorTier, Result};
pub use state::{GameState, MatchStatus, WinReason, ZoneViolation};
