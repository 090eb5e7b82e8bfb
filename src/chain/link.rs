//! Chain links.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardRef, Seat};
use crate::effects::{Effect, EffectOutcome};

/// Unique identifier for a chain link within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainLinkId(pub u32);

impl ChainLinkId {
    /// Create a new chain link ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ChainLinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainLink({})", self.0)
    }
}

/// One activation waiting on the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub id: ChainLinkId,

    /// Position in the chain, starting at 1 for the first link.
    pub number: usize,

    /// The activated card.
    pub card: CardRef,

    /// Who activated it.
    pub controller: Seat,

    /// What it will do on resolution.
    pub effect: Effect,

    /// Targets chosen on activation.
    pub targets: SmallVec<[CardRef; 2]>,
}

/// What happened when one link resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResolution {
    pub link: ChainLinkId,
    pub number: usize,
    pub card: CardRef,
    pub controller: Seat,
    pub outcome: EffectOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_link_id() {
        let id = ChainLinkId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "ChainLink(5)");
    }
}
