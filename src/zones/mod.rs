//! Zone system for card locations.
//!
//! Each seat owns a hand, deck, graveyard, banished pile, monster board and
//! spell/trap zone. Every `CardRef` in a match sits in exactly one of them.
//!
//! ## Key Types
//!
//! - `Zone`: Names every zone a card can occupy
//! - `Pile`: The zones that store bare card references
//! - `DeckPosition`: Where a card re-enters the deck
//! - `PlayerSlot`: One seat's zones, life total and per-turn flags
//! - `BoardCard` / `ZoneCard`: Field entries with stance, orientation and flags

pub mod board;
pub mod slot;

pub use board::{BoardCard, Orientation, Protection, Stance, ZoneCard};
pub use slot::{DeckPosition, Pile, PlayerSlot, Zone};
