//! Game event types.
//!
//! Every committed state change is mirrored by one or more `GameEvent`s.
//! Events are write-once: the recorder hands them out by value or shared
//! reference and never mutates or removes them while the match is live.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{GameId, LobbyId, Seat, UserId};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // === Lifecycle ===
    GameStart,
    GameEnd,
    TurnStart,
    TurnEnd,
    PhaseChanged,

    // === Monsters ===
    NormalSummon,
    TributeSummon,
    TributePaid,
    MonsterSet,
    FlipSummon,
    SpecialSummon,
    PositionChanged,

    // === Spells and traps ===
    SpellSet,
    TrapSet,
    SpellActivated,
    TrapActivated,

    // === Effects and chains ===
    EffectActivated,
    EffectNegated,
    ChainLinkAdded,
    ChainResolved,

    // === Card movement ===
    CardDrawn,
    CardToGraveyard,
    CardToHand,
    CardBanished,
    CardReturnedToDeck,
    CardDiscarded,
    DeckSearched,
    HandLimitEnforced,

    // === Stats ===
    #[serde(rename = "lp_changed")]
    LpChanged,
    #[serde(rename = "atk_modified")]
    AtkModified,
}

impl EventType {
    /// Snake-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::GameStart => "game_start",
            EventType::GameEnd => "game_end",
            EventType::TurnStart => "turn_start",
            EventType::TurnEnd => "turn_end",
            EventType::PhaseChanged => "phase_changed",
            EventType::NormalSummon => "normal_summon",
            EventType::TributeSummon => "tribute_summon",
            EventType::TributePaid => "tribute_paid",
            EventType::MonsterSet => "monster_set",
            EventType::FlipSummon => "flip_summon",
            EventType::SpecialSummon => "special_summon",
            EventType::PositionChanged => "position_changed",
            EventType::SpellSet => "spell_set",
            EventType::TrapSet => "trap_set",
            EventType::SpellActivated => "spell_activated",
            EventType::TrapActivated => "trap_activated",
            EventType::EffectActivated => "effect_activated",
            EventType::EffectNegated => "effect_negated",
            EventType::ChainLinkAdded => "chain_link_added",
            EventType::ChainResolved => "chain_resolved",
            EventType::CardDrawn => "card_drawn",
            EventType::CardToGraveyard => "card_to_graveyard",
            EventType::CardToHand => "card_to_hand",
            EventType::CardBanished => "card_banished",
            EventType::CardReturnedToDeck => "card_returned_to_deck",
            EventType::CardDiscarded => "card_discarded",
            EventType::DeckSearched => "deck_searched",
            EventType::HandLimitEnforced => "hand_limit_enforced",
            EventType::LpChanged => "lp_changed",
            EventType::AtkModified => "atk_modified",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub lobby_id: LobbyId,
    pub game_id: GameId,
    pub turn_number: u32,

    /// Position in the match log, starting at 0.
    pub sequence: u64,

    pub event_type: EventType,

    /// Seat the event concerns, if any.
    pub seat: Option<Seat>,

    /// Account behind `seat`.
    pub player_id: Option<UserId>,

    /// Human-readable summary.
    pub description: String,

    /// Structured details (card ids, amounts, positions).
    pub metadata: Value,
}

/// An event waiting to be stamped by the recorder.
///
/// ## Example
///
/// ```
/// use rust_duel::core::Seat;
/// use rust_duel::events::{EventType, NewEvent};
///
/// let event = NewEvent::new(EventType::LpChanged, "Bob takes 500 damage")
///     .with_seat(Seat::Opponent)
///     .with_meta("change", -500);
///
/// assert_eq!(event.metadata["change"], -500);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NewEvent {
    pub event_type: EventType,
    pub seat: Option<Seat>,
    pub description: String,
    pub metadata: Value,
}

impl NewEvent {
    /// Create an event with empty metadata.
    pub fn new(event_type: EventType, description: impl Into<String>) -> Self {
        Self {
            event_type,
            seat: None,
            description: description.into(),
            metadata: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the associated seat (builder pattern).
    #[must_use]
    pub fn with_seat(mut self, seat: Seat) -> Self {
        self.seat = Some(seat);
        self
    }

    /// Add one metadata field (builder pattern).
    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.metadata {
            map.insert(key.to_string(), value.into());
        }
        self
    }
}
