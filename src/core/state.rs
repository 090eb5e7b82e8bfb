//! Game state: the complete record of one duel.
//!
//! ## GameState
//!
//! - Turn number, turn player and phase
//! - Both `PlayerSlot`s (zones, life points, per-turn flags)
//! - The card table mapping every `CardRef` to its definition and owner
//! - Once-per-turn usage and negations for the current turn
//! - Match status and the seeded RNG
//!
//! All collections are `im` persistent structures, so cloning a state is
//! O(1). Turn actions clone, mutate the clone and commit it on success.

use im::{HashMap as ImHashMap, HashSet as ImHashSet};
use serde::{Deserialize, Serialize};

use super::config::{Phase, RulesConfig};
use super::entity::CardRef;
use super::error::{EngineError, Result};
use super::player::{Seat, Seats};
use super::rng::GameRng;
use crate::cards::{CardId, CardInstance};
use crate::zones::{BoardCard, DeckPosition, Pile, PlayerSlot, Zone};

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    LifePoints,
    DeckOut,
    Surrender,
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Active,
    Finished { winner: Seat, reason: WinReason },
}

/// A card found in more or fewer than one zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneViolation {
    pub card: CardRef,
    pub occurrences: usize,
}

impl std::fmt::Display for ZoneViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} found in {} zones", self.card, self.occurrences)
    }
}

/// Complete state of one duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    // === Game Progression ===
    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Whose turn it is.
    pub current_turn: Seat,

    /// Current phase of the turn.
    pub phase: Phase,

    /// Active or finished.
    pub status: MatchStatus,

    // === Zones ===
    /// Both sides of the table.
    pub players: Seats<PlayerSlot>,

    /// Every physical card in the match.
    pub cards: ImHashMap<CardRef, CardInstance>,

    // === Per-turn tracking ===
    /// Sources whose once-per-turn effect was used this turn.
    pub opt_used: ImHashSet<CardRef>,

    /// Cards whose effects are negated until end of turn.
    pub negated: ImHashSet<CardRef>,

    // === Chain ===
    /// Spell and Trap cards lifted onto an open chain. They sit in no
    /// zone until their link resolves.
    pub chained: ImHashSet<CardRef>,

    // === Randomness ===
    pub rng: GameRng,

    next_card: u32,
}

impl GameState {
    /// Create an empty match state: turn 1, host to move, Draw Phase.
    #[must_use]
    pub fn new(config: &RulesConfig, seed: u64) -> Self {
        Self {
            turn_number: 1,
            current_turn: Seat::Host,
            phase: Phase::Draw,
            status: MatchStatus::Active,
            players: Seats::from_fn(|_| PlayerSlot::new(config.starting_life_points)),
            cards: ImHashMap::new(),
            opt_used: ImHashSet::new(),
            negated: ImHashSet::new(),
            chained: ImHashSet::new(),
            rng: GameRng::new(seed),
            next_card: 0,
        }
    }

    // === Slots ===

    /// A seat's zones.
    #[must_use]
    pub fn slot(&self, seat: Seat) -> &PlayerSlot {
        &self.players[seat]
    }

    /// Mutable access to a seat's zones.
    pub fn slot_mut(&mut self, seat: Seat) -> &mut PlayerSlot {
        &mut self.players[seat]
    }

    // === Cards ===

    /// Create a new physical card at the bottom of `owner`'s deck.
    pub fn add_card(&mut self, owner: Seat, definition: CardId) -> CardRef {
        let card = CardRef::new(self.next_card);
        self.next_card += 1;
        self.cards.insert(card, CardInstance::new(card, definition, owner));
        self.players[owner].deck.push_back(card);
        card
    }

    /// Instance data for a card.
    #[must_use]
    pub fn instance(&self, card: CardRef) -> Option<&CardInstance> {
        self.cards.get(&card)
    }

    /// Definition id of a card.
    #[must_use]
    pub fn definition_of(&self, card: CardRef) -> Option<CardId> {
        self.cards.get(&card).map(|i| i.definition)
    }

    /// Owner of a card.
    #[must_use]
    pub fn owner_of(&self, card: CardRef) -> Option<Seat> {
        self.cards.get(&card).map(|i| i.owner)
    }

    /// Which seat and zone currently hold `card`.
    #[must_use]
    pub fn locate(&self, card: CardRef) -> Option<(Seat, Zone)> {
        self.players
            .iter()
            .find_map(|(seat, slot)| slot.zone_of(card).map(|zone| (seat, zone)))
    }

    /// Board entry for `card` on either side.
    #[must_use]
    pub fn board_card(&self, card: CardRef) -> Option<(Seat, &BoardCard)> {
        self.players
            .iter()
            .find_map(|(seat, slot)| slot.board_card(card).map(|entry| (seat, entry)))
    }

    /// Mutable board entry for `card` on either side.
    pub fn board_card_mut(&mut self, card: CardRef) -> Option<&mut BoardCard> {
        let (seat, _) = self.board_card(card)?;
        self.players[seat].board_card_mut(card)
    }

    /// Move a card from wherever it is into one of its owner's piles.
    ///
    /// Returns the zone it left, or `None` (and changes nothing) if the card
    /// is unknown or not in any zone.
    pub fn move_to_pile(&mut self, card: CardRef, pile: Pile, position: DeckPosition) -> Option<Zone> {
        let owner = self.owner_of(card)?;
        let (holder, from) = self.locate(card)?;
        self.players[holder].take_from(from, card);
        let rng = &mut self.rng;
        self.players[owner].push(pile, card, position, rng);
        Some(from)
    }

    /// Push a card that is in no zone onto one of its owner's piles.
    ///
    /// Used for cards lifted out of play mid-action (an activated spell)
    /// that must land somewhere before the action commits.
    pub fn place_in_pile(&mut self, card: CardRef, pile: Pile, position: DeckPosition) -> bool {
        if self.locate(card).is_some() {
            return false;
        }
        let Some(owner) = self.owner_of(card) else {
            return false;
        };
        let rng = &mut self.rng;
        self.players[owner].push(pile, card, position, rng);
        true
    }

    /// Shuffle a seat's deck.
    pub fn shuffle_deck(&mut self, seat: Seat) {
        let rng = &mut self.rng;
        rng.shuffle_vector(&mut self.players[seat].deck);
    }

    // === Status ===

    /// Whether the match is still being played.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MatchStatus::Active
    }

    /// Fail with `GameOver` unless the match is active.
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(EngineError::GameOver)
        }
    }

    /// Clear once-per-turn usage and negations.
    pub fn clear_turn_tracking(&mut self) {
        self.opt_used = ImHashSet::new();
        self.negated = ImHashSet::new();
    }

    // === Invariants ===

    /// Check that every known card sits in exactly one zone (or on the
    /// chain) and no zone holds an unknown card.
    pub fn audit_zones(&self) -> std::result::Result<(), ZoneViolation> {
        let mut counts: rustc_hash::FxHashMap<CardRef, usize> = self
            .cards
            .keys()
            .map(|card| (*card, 0))
            .collect();

        for (_, slot) in self.players.iter() {
            for zone in Zone::ALL {
                for card in slot.cards_in(zone) {
                    *counts.entry(card).or_insert(0) += 1;
                }
            }
        }
        for card in &self.chained {
            *counts.entry(*card).or_insert(0) += 1;
        }

        let mut offenders: Vec<_> = counts.into_iter().filter(|(_, n)| *n != 1).collect();
        offenders.sort_unstable();
        match offenders.first() {
            Some(&(card, occurrences)) => Err(ZoneViolation { card, occurrences }),
            None => Ok(()),
        }
    }

    // === Persistence ===

    /// Serialize to a compact binary snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Restore from a snapshot produced by [`GameState::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))
    }
}
