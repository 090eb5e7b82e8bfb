//! Result summaries returned by turn actions.
//!
//! A returned summary means the action committed. Soft effect failures
//! appear inside it as `EffectOutcome`s or `effect_applied: false`.

use serde::{Deserialize, Serialize};

use crate::cards::CardType;
use crate::core::{CardRef, GameId, LobbyId, Phase, Seat, Seats, UserId, WinReason};
use crate::effects::EffectOutcome;
use crate::events::GameEvent;
use crate::zones::Stance;

/// Normal or Tribute Summon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonResult {
    pub card: CardRef,
    pub card_summoned: String,
    pub position: Stance,
    pub tributes_used: usize,

    /// Combined outcome of `on_summon` effects, if any fired.
    pub trigger_effect: Option<EffectOutcome>,
}

/// Monster Set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMonsterResult {
    pub card_set: CardRef,
    pub tributes_used: usize,
}

/// Flip Summon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipSummonResult {
    pub card: CardRef,
    pub card_flipped: String,
    pub position: Stance,
    pub flip_effect: Option<EffectOutcome>,
}

/// Manual battle position change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChangeResult {
    pub card: CardRef,
    pub position: Stance,
}

/// Spell/Trap Set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSpellTrapResult {
    pub card: CardRef,
    pub card_type: CardType,
}

/// Spell or Trap activation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationResult {
    pub card: CardRef,
    pub card_name: String,
    pub effect_applied: bool,
    pub effect_message: String,
}

impl ActivationResult {
    pub(crate) fn from_outcomes(card: CardRef, card_name: String, outcomes: Vec<EffectOutcome>) -> Self {
        if outcomes.is_empty() {
            return Self {
                card,
                card_name,
                effect_applied: false,
                effect_message: "No effect".to_string(),
            };
        }
        let merged = EffectOutcome::merge(outcomes);
        Self {
            card,
            card_name,
            effect_applied: merged.success,
            effect_message: merged.message,
        }
    }
}

/// Phase advance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub from: Phase,
    pub to: Phase,
    pub triggered: Vec<EffectOutcome>,
}

/// End of turn and the start of the next one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndTurnResult {
    pub next_player: Seat,
    pub turn_number: u32,
    pub discarded: Vec<CardRef>,
    pub cards_drawn: usize,
    pub end_phase_effects: Vec<EffectOutcome>,

    /// Set if the match ended during the hand-off (deck-out, LP).
    pub game_over: Option<(Seat, WinReason)>,
}

/// A finished match removed from the live table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchivedMatch {
    pub lobby_id: LobbyId,
    pub game_id: GameId,
    pub players: Seats<UserId>,
    pub winner: Seat,
    pub reason: WinReason,
    pub turns: u32,

    /// `GameState` snapshot in bincode.
    pub snapshot: Vec<u8>,

    pub events: Vec<GameEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_without_effects() {
        let result = ActivationResult::from_outcomes(CardRef::new(1), "Blank".to_string(), Vec::new());
        assert!(!result.effect_applied);
        assert_eq!(result.effect_message, "No effect");
    }

    #[test]
    fn test_activation_merges_outcomes() {
        let result = ActivationResult::from_outcomes(
            CardRef::new(1),
            "Twin Bolt".to_string(),
            vec![EffectOutcome::ok("Dealt 300 damage"), EffectOutcome::fail("No target selected")],
        );
        assert!(result.effect_applied);
        assert_eq!(result.effect_message, "Dealt 300 damage; No target selected");
    }
}
