//! Chain resolution.
//!
//! Activations are stacked as `ChainLink`s. After each new link the other
//! player receives priority and may respond with a link of their own or
//! pass. Two consecutive passes close the chain, which then resolves
//! newest-first (LIFO).
//!
//! ## Key Types
//!
//! - `Chain`: The link stack and its priority state machine
//! - `ChainState`: `Idle`, `PriorityWindow`, `Resolving`
//! - `ChainLink`: Card, controller, effect and targets of one activation
//! - `LinkResolution`: The outcome of one resolved link

mod link;
mod stack;

pub use link::{ChainLink, ChainLinkId, LinkResolution};
pub use stack::{Chain, ChainState};

use serde::{Deserialize, Serialize};

use crate::core::Seat;

/// Result of a priority pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// The given seat must pass or respond.
    WaitingForPriority(Seat),

    /// Both seats passed; call `resolve`.
    ReadyToResolve,
}
