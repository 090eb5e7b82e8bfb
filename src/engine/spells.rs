//! Spell and Trap actions: Set, activate.
//!
//! Activation lifts the card out of its zone before the ability runs, so an
//! effect that inspects the hand or the spell/trap zone never sees the card
//! being activated. The spent card lands in its owner's graveyard once the
//! ability has resolved.

use crate::cards::{CardDefinition, CardType};
use crate::core::{Caller, CardRef, EngineError, LobbyId, Result};
use crate::effects::run_ability;
use crate::events::{EventType, NewEvent};
use crate::zones::{DeckPosition, Pile, Zone, ZoneCard};

use super::game::{GameEngine, Turn, TurnLock};
use super::results::{ActivationResult, SetSpellTrapResult};
use super::validator::{require_main_phase, require_no_chain};

fn is_spell(definition: &CardDefinition) -> bool {
    matches!(definition.card_type, CardType::Spell | CardType::Equipment)
}

/// Lift the card, record the activation, run its ability and send it to
/// the graveyard.
fn activate(
    turn: &mut Turn<'_>,
    card: CardRef,
    from: Zone,
    definition: &CardDefinition,
    targets: &[CardRef],
) -> ActivationResult {
    let seat = turn.seat;
    turn.state.slot_mut(seat).take_from(from, card);

    let event_type = if definition.card_type == CardType::Trap {
        EventType::TrapActivated
    } else {
        EventType::SpellActivated
    };
    turn.record(
        NewEvent::new(event_type, format!("{seat} activated {}", definition.name))
            .with_seat(seat)
            .with_meta("cardId", card.raw())
            .with_meta("cardName", definition.name.as_str())
            .with_meta("from", from.as_str()),
    );

    let outcomes = turn.with_effects(|state, ctx| run_ability(state, ctx, card, seat, targets));
    let result = ActivationResult::from_outcomes(card, definition.name.clone(), outcomes);
    if !result.effect_applied {
        tracing::warn!(card = %definition.name, message = %result.effect_message, "activation had no effect");
    }

    turn.state.place_in_pile(card, Pile::Graveyard, DeckPosition::Top);
    turn.record(
        NewEvent::new(EventType::CardToGraveyard, format!("{} was sent to the graveyard", definition.name))
            .with_seat(seat)
            .with_meta("cardId", card.raw())
            .with_meta("cardName", definition.name.as_str())
            .with_meta("reason", "spent"),
    );
    result
}

impl GameEngine {
    /// Set a Spell or Trap face-down in the spell/trap zone.
    pub fn set_spell_trap(&mut self, caller: &Caller, lobby: &LobbyId, card: CardRef) -> Result<SetSpellTrapResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "set_spell_trap", |turn| {
            require_main_phase(turn, "Set a Spell/Trap")?;
            require_no_chain(turn)?;
            turn.require_own(card, Zone::Hand)?;
            let definition = turn.definition(card)?;
            if definition.card_type.is_monster() {
                return Err(EngineError::WrongCardType {
                    name: definition.name.clone(),
                    expected: "spell or trap",
                });
            }
            let seat = turn.seat;
            let max = turn.config.max_spell_trap_zones;
            if turn.state.slot(seat).spell_trap_zone.len() >= max {
                return Err(EngineError::ZoneFull { zone: Zone::SpellTrap, max });
            }

            let turn_number = turn.state.turn_number;
            let slot = turn.state.slot_mut(seat);
            slot.take_from(Zone::Hand, card);
            slot.place_spell_trap(ZoneCard::set(card, turn_number));

            let (event_type, label) = if definition.card_type == CardType::Trap {
                (EventType::TrapSet, "Trap")
            } else {
                (EventType::SpellSet, "Spell")
            };
            turn.record(
                NewEvent::new(event_type, format!("{seat} Set a {label} card"))
                    .with_seat(seat)
                    .with_meta("cardId", card.raw()),
            );
            Ok(SetSpellTrapResult {
                card,
                card_type: definition.card_type,
            })
        })
    }

    /// Activate a Spell from the hand or from a face-down zone card.
    pub fn activate_spell(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        card: CardRef,
        targets: &[CardRef],
    ) -> Result<ActivationResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "activate_spell", |turn| {
            require_main_phase(turn, "activate a Spell")?;
            require_no_chain(turn)?;
            let definition = turn.definition(card)?;
            if !is_spell(definition) {
                return Err(EngineError::WrongCardType {
                    name: definition.name.clone(),
                    expected: "spell",
                });
            }

            let slot = turn.state.slot(turn.seat);
            let from = if slot.contains(Zone::Hand, card) {
                Zone::Hand
            } else if slot.zone_card(card).is_some_and(ZoneCard::is_face_down) {
                Zone::SpellTrap
            } else {
                return Err(EngineError::CardNotInZone { card, zone: Zone::Hand });
            };
            Ok(activate(turn, card, from, definition, targets))
        })
    }

    /// Activate a Trap the caller has Set.
    ///
    /// Either participant may activate a Trap, in any phase. How long the
    /// card has been Set is not checked.
    pub fn activate_trap(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        card: CardRef,
        targets: &[CardRef],
    ) -> Result<ActivationResult> {
        self.transact(caller, lobby, TurnLock::AnyParticipant, "activate_trap", |turn| {
            require_no_chain(turn)?;
            let definition = turn.definition(card)?;
            if definition.card_type != CardType::Trap {
                return Err(EngineError::WrongCardType {
                    name: definition.name.clone(),
                    expected: "trap",
                });
            }
            if !turn
                .state
                .slot(turn.seat)
                .zone_card(card)
                .is_some_and(ZoneCard::is_face_down)
            {
                return Err(EngineError::CardNotInZone {
                    card,
                    zone: Zone::SpellTrap,
                });
            }
            Ok(activate(turn, card, Zone::SpellTrap, definition, targets))
        })
    }
}
