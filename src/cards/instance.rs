//! Card instances - physical copies in a match.
//!
//! A `CardInstance` binds a `CardRef` to its printed definition and its
//! owner. Owners never change: every move sends a card to a zone on its
//! owner's side of the table.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::{CardRef, Seat};

/// A physical card in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique reference for this copy.
    pub card: CardRef,

    /// Which printed card this is.
    pub definition: CardId,

    /// Whose deck it started in.
    pub owner: Seat,
}

impl CardInstance {
    /// Create a new instance.
    #[must_use]
    pub const fn new(card: CardRef, definition: CardId, owner: Seat) -> Self {
        Self { card, definition, owner }
    }
}
