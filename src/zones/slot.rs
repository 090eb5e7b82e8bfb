//! Per-player zones and card movement.
//!
//! `PlayerSlot` owns one side of the table. Piles (hand, deck, graveyard,
//! banished) hold bare `CardRef`s; the board and spell/trap zone hold
//! `BoardCard`/`ZoneCard` entries. Moving a card is always `take` followed
//! by `push`/`place_*` on the same slot, done under one `&mut` borrow so no
//! reader can observe the card in zero or two zones.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{CardRef, GameRng};

use super::board::{BoardCard, ZoneCard};

/// Every zone a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Hand,
    Deck,
    Graveyard,
    Banished,
    Board,
    SpellTrap,
}

impl Zone {
    /// All zones, in audit order.
    pub const ALL: [Zone; 6] = [
        Zone::Hand,
        Zone::Deck,
        Zone::Graveyard,
        Zone::Banished,
        Zone::Board,
        Zone::SpellTrap,
    ];

    /// Snake-case label used in event metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Zone::Hand => "hand",
            Zone::Deck => "deck",
            Zone::Graveyard => "graveyard",
            Zone::Banished => "banished",
            Zone::Board => "board",
            Zone::SpellTrap => "spell_trap_zone",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Hand => "Hand",
            Zone::Deck => "Deck",
            Zone::Graveyard => "Graveyard",
            Zone::Banished => "Banished Zone",
            Zone::Board => "Monster Zone",
            Zone::SpellTrap => "Spell/Trap Zone",
        };
        write!(f, "{}", name)
    }
}

/// Zones that hold bare card references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Hand,
    Deck,
    Graveyard,
    Banished,
}

impl From<Pile> for Zone {
    fn from(pile: Pile) -> Zone {
        match pile {
            Pile::Hand => Zone::Hand,
            Pile::Deck => Zone::Deck,
            Pile::Graveyard => Zone::Graveyard,
            Pile::Banished => Zone::Banished,
        }
    }
}

/// Where a card enters the deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckPosition {
    /// Next card drawn.
    Top,
    /// Last card drawn.
    Bottom,
    /// Added, then the whole deck is shuffled.
    #[default]
    Shuffle,
}

impl DeckPosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeckPosition::Top => "top",
            DeckPosition::Bottom => "bottom",
            DeckPosition::Shuffle => "shuffle",
        }
    }
}

/// One player's side of the table.
///
/// The deck's front (index 0) is its top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub hand: Vector<CardRef>,
    pub deck: Vector<CardRef>,
    pub graveyard: Vector<CardRef>,
    pub banished: Vector<CardRef>,
    pub board: Vector<BoardCard>,
    pub spell_trap_zone: Vector<ZoneCard>,
    pub life_points: i64,
    pub normal_summoned_this_turn: bool,
}

impl PlayerSlot {
    /// An empty slot with the given life total.
    #[must_use]
    pub fn new(life_points: i64) -> Self {
        Self {
            hand: Vector::new(),
            deck: Vector::new(),
            graveyard: Vector::new(),
            banished: Vector::new(),
            board: Vector::new(),
            spell_trap_zone: Vector::new(),
            life_points,
            normal_summoned_this_turn: false,
        }
    }

    fn pile(&self, pile: Pile) -> &Vector<CardRef> {
        match pile {
            Pile::Hand => &self.hand,
            Pile::Deck => &self.deck,
            Pile::Graveyard => &self.graveyard,
            Pile::Banished => &self.banished,
        }
    }

    fn pile_mut(&mut self, pile: Pile) -> &mut Vector<CardRef> {
        match pile {
            Pile::Hand => &mut self.hand,
            Pile::Deck => &mut self.deck,
            Pile::Graveyard => &mut self.graveyard,
            Pile::Banished => &mut self.banished,
        }
    }

    // === Queries ===

    /// Cards in a zone, in zone order.
    #[must_use]
    pub fn cards_in(&self, zone: Zone) -> Vec<CardRef> {
        match zone {
            Zone::Hand => self.hand.iter().copied().collect(),
            Zone::Deck => self.deck.iter().copied().collect(),
            Zone::Graveyard => self.graveyard.iter().copied().collect(),
            Zone::Banished => self.banished.iter().copied().collect(),
            Zone::Board => self.board.iter().map(|b| b.card).collect(),
            Zone::SpellTrap => self.spell_trap_zone.iter().map(|z| z.card).collect(),
        }
    }

    /// Whether `card` is in `zone`.
    #[must_use]
    pub fn contains(&self, zone: Zone, card: CardRef) -> bool {
        match zone {
            Zone::Hand => self.hand.contains(&card),
            Zone::Deck => self.deck.contains(&card),
            Zone::Graveyard => self.graveyard.contains(&card),
            Zone::Banished => self.banished.contains(&card),
            Zone::Board => self.board.iter().any(|b| b.card == card),
            Zone::SpellTrap => self.spell_trap_zone.iter().any(|z| z.card == card),
        }
    }

    /// The zone holding `card`, if it is on this side.
    #[must_use]
    pub fn zone_of(&self, card: CardRef) -> Option<Zone> {
        Zone::ALL.into_iter().find(|zone| self.contains(*zone, card))
    }

    /// Number of cards across every zone.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hand.len()
            + self.deck.len()
            + self.graveyard.len()
            + self.banished.len()
            + self.board.len()
            + self.spell_trap_zone.len()
    }

    /// The board entry for `card`.
    #[must_use]
    pub fn board_card(&self, card: CardRef) -> Option<&BoardCard> {
        self.board.iter().find(|b| b.card == card)
    }

    /// Mutable board entry for `card`.
    pub fn board_card_mut(&mut self, card: CardRef) -> Option<&mut BoardCard> {
        self.board.iter_mut().find(|b| b.card == card)
    }

    /// The spell/trap zone entry for `card`.
    #[must_use]
    pub fn zone_card(&self, card: CardRef) -> Option<&ZoneCard> {
        self.spell_trap_zone.iter().find(|z| z.card == card)
    }

    // === Movement ===

    /// Remove `card` from `zone`. Returns false if it was not there.
    pub fn take_from(&mut self, zone: Zone, card: CardRef) -> bool {
        match zone {
            Zone::Hand => remove_ref(&mut self.hand, card),
            Zone::Deck => remove_ref(&mut self.deck, card),
            Zone::Graveyard => remove_ref(&mut self.graveyard, card),
            Zone::Banished => remove_ref(&mut self.banished, card),
            Zone::Board => self
                .board
                .iter()
                .position(|b| b.card == card)
                .map(|index| self.board.remove(index))
                .is_some(),
            Zone::SpellTrap => self
                .spell_trap_zone
                .iter()
                .position(|z| z.card == card)
                .map(|index| self.spell_trap_zone.remove(index))
                .is_some(),
        }
    }

    /// Remove `card` from whichever zone holds it, returning that zone.
    pub fn take(&mut self, card: CardRef) -> Option<Zone> {
        let zone = self.zone_of(card)?;
        self.take_from(zone, card);
        Some(zone)
    }

    /// Add `card` to a pile. Deck insertions honor `position`; other piles append.
    pub fn push(&mut self, pile: Pile, card: CardRef, position: DeckPosition, rng: &mut GameRng) {
        if pile != Pile::Deck {
            self.pile_mut(pile).push_back(card);
            return;
        }
        match position {
            DeckPosition::Top => self.deck.push_front(card),
            DeckPosition::Bottom => self.deck.push_back(card),
            DeckPosition::Shuffle => {
                self.deck.push_back(card);
                rng.shuffle_vector(&mut self.deck);
            }
        }
    }

    /// Put a monster entry on the board.
    pub fn place_monster(&mut self, entry: BoardCard) {
        self.board.push_back(entry);
    }

    /// Put a card entry in the spell/trap zone.
    pub fn place_spell_trap(&mut self, entry: ZoneCard) {
        self.spell_trap_zone.push_back(entry);
    }

    /// Remove and return the top card of the deck.
    pub fn pop_deck(&mut self) -> Option<CardRef> {
        self.deck.pop_front()
    }

    /// Cards in a pile.
    #[must_use]
    pub fn pile_len(&self, pile: Pile) -> usize {
        self.pile(pile).len()
    }
}

fn remove_ref(pile: &mut Vector<CardRef>, card: CardRef) -> bool {
    match pile.index_of(&card) {
        Some(index) => {
            pile.remove(index);
            true
        }
        None => false,
    }
}
