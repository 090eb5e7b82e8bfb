//! Legality checks shared by the turn actions.
//!
//! Validators only read the working copy. They run before any mutation, so
//! a rejected action leaves nothing to roll back.

use rustc_hash::FxHashSet;

use crate::cards::CardDefinition;
use crate::core::{CardRef, EngineError, Phase, Result};
use crate::zones::Zone;

use super::game::Turn;

/// Require Main Phase 1 or 2.
pub(crate) fn require_main_phase(turn: &Turn<'_>, action: &'static str) -> Result<()> {
    let phase = turn.state.phase;
    if phase.is_main() {
        Ok(())
    } else {
        Err(EngineError::WrongPhase { action, phase })
    }
}

/// Require an idle chain.
pub(crate) fn require_no_chain(turn: &Turn<'_>) -> Result<()> {
    if turn.chain.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Chain("resolve the current chain first".to_string()))
    }
}

/// Require a monster card.
pub(crate) fn require_monster(definition: &CardDefinition) -> Result<()> {
    if definition.card_type.is_monster() {
        Ok(())
    } else {
        Err(EngineError::WrongCardType {
            name: definition.name.clone(),
            expected: "monster",
        })
    }
}

/// Validate a Normal Summon or Set: summon limit, hand membership, tribute
/// count and ownership, and the resulting board size.
pub(crate) fn validate_summon<'a>(
    turn: &Turn<'a>,
    card: CardRef,
    tributes: &[CardRef],
    action: &'static str,
) -> Result<&'a CardDefinition> {
    require_main_phase(turn, action)?;
    require_no_chain(turn)?;
    let slot = turn.state.slot(turn.seat);
    if slot.normal_summoned_this_turn {
        return Err(EngineError::AlreadyNormalSummoned);
    }
    turn.require_own(card, Zone::Hand)?;
    let definition = turn.definition(card)?;
    require_monster(definition)?;

    let required = turn.config.tributes_for_level(definition.level);
    if tributes.len() != required {
        return Err(EngineError::TributeMismatch {
            required,
            provided: tributes.len(),
        });
    }
    let mut seen = FxHashSet::default();
    for &tribute in tributes {
        if !seen.insert(tribute) {
            return Err(EngineError::illegal(format!("{tribute} was offered as a tribute twice")));
        }
        turn.require_own(tribute, Zone::Board)?;
    }

    let max = turn.config.max_monster_zones;
    if slot.board.len() - tributes.len() >= max {
        return Err(EngineError::ZoneFull { zone: Zone::Board, max });
    }
    Ok(definition)
}

/// Phase transitions a player may request.
pub(crate) fn next_phase(current: Phase) -> Result<Phase> {
    match current {
        Phase::End => Err(EngineError::illegal("The End Phase is over; end the turn instead")),
        other => other
            .next()
            .ok_or_else(|| EngineError::illegal("No phase follows the End Phase")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_phase() {
        assert_eq!(next_phase(Phase::Main1).unwrap(), Phase::Battle);
        assert_eq!(next_phase(Phase::Main2).unwrap(), Phase::End);
        assert!(next_phase(Phase::End).is_err());
    }

    #[test]
    fn test_require_monster() {
        use crate::cards::{CardId, CardType};

        let spell = CardDefinition::new(CardId::new(1), "Pot of Plenty", CardType::Spell);
        let err = require_monster(&spell).unwrap_err();
        assert_eq!(err.to_string(), "Pot of Plenty is not a monster card");
    }
}
