//! Monster actions: Normal/Tribute Summon, Set, Flip Summon, position change.

use serde_json::json;

use crate::core::{Caller, CardRef, EngineError, LobbyId, Result};
use crate::effects::{fire_trigger, EffectOutcome, Trigger};
use crate::events::{EventType, NewEvent};
use crate::zones::{BoardCard, DeckPosition, Orientation, Pile, Stance, Zone};

use super::game::{GameEngine, Turn, TurnLock};
use super::results::{FlipSummonResult, PositionChangeResult, SetMonsterResult, SummonResult};
use super::validator::{require_main_phase, require_no_chain, validate_summon};

/// Send each tribute to the graveyard, one event per tribute.
fn pay_tributes(turn: &mut Turn<'_>, tributes: &[CardRef]) {
    for &tribute in tributes {
        let name = turn
            .definition(tribute)
            .map_or_else(|_| "Unknown Card".to_string(), |d| d.name.clone());
        turn.state.move_to_pile(tribute, Pile::Graveyard, DeckPosition::Top);
        let seat = turn.seat;
        turn.record(
            NewEvent::new(EventType::TributePaid, format!("{name} was tributed"))
                .with_seat(seat)
                .with_meta("cardId", tribute.raw())
                .with_meta("cardName", name),
        );
    }
}

fn merged(outcomes: Vec<EffectOutcome>) -> Option<EffectOutcome> {
    (!outcomes.is_empty()).then(|| EffectOutcome::merge(outcomes))
}

impl GameEngine {
    /// Normal Summon (or Tribute Summon) a monster from hand, face-up.
    ///
    /// Tributes go to the graveyard first, then the monster enters the
    /// field with protection from its ability, then its `on_summon`
    /// effects fire.
    pub fn normal_summon(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        card: CardRef,
        tributes: &[CardRef],
        position: Stance,
    ) -> Result<SummonResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "normal_summon", |turn| {
            let definition = validate_summon(turn, card, tributes, "Normal Summon")?;
            let seat = turn.seat;

            pay_tributes(turn, tributes);

            let protection = turn.registry.ability(definition.id).protection();
            turn.state.slot_mut(seat).take_from(Zone::Hand, card);
            let entry = BoardCard::face_up(card, position, definition.attack, definition.defense, turn.state.turn_number)
                .with_protection(protection);
            turn.state.slot_mut(seat).place_monster(entry);
            turn.state.slot_mut(seat).normal_summoned_this_turn = true;

            let (event_type, verb) = if tributes.is_empty() {
                (EventType::NormalSummon, "Normal Summoned")
            } else {
                (EventType::TributeSummon, "Tribute Summoned")
            };
            let tribute_ids: Vec<u32> = tributes.iter().map(|t| t.raw()).collect();
            turn.record(
                NewEvent::new(event_type, format!("{seat} {verb} {}", definition.name))
                    .with_seat(seat)
                    .with_meta("cardId", card.raw())
                    .with_meta("cardName", definition.name.as_str())
                    .with_meta("position", position.as_str())
                    .with_meta("tributes", json!(tribute_ids)),
            );

            let triggered = turn.with_effects(|state, ctx| fire_trigger(state, ctx, card, seat, Trigger::OnSummon));
            Ok(SummonResult {
                card,
                card_summoned: definition.name.clone(),
                position,
                tributes_used: tributes.len(),
                trigger_effect: merged(triggered),
            })
        })
    }

    /// Set a monster face-down in Defense Position.
    ///
    /// Uses the turn's Normal Summon. The event log does not reveal which
    /// card was set.
    pub fn set_monster(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        card: CardRef,
        tributes: &[CardRef],
    ) -> Result<SetMonsterResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "set_monster", |turn| {
            let definition = validate_summon(turn, card, tributes, "Set a monster")?;
            let seat = turn.seat;

            pay_tributes(turn, tributes);

            let protection = turn.registry.ability(definition.id).protection();
            turn.state.slot_mut(seat).take_from(Zone::Hand, card);
            let entry = BoardCard::face_down(card, definition.attack, definition.defense, turn.state.turn_number)
                .with_protection(protection);
            turn.state.slot_mut(seat).place_monster(entry);
            turn.state.slot_mut(seat).normal_summoned_this_turn = true;

            turn.record(
                NewEvent::new(EventType::MonsterSet, format!("{seat} Set a monster"))
                    .with_seat(seat)
                    .with_meta("cardId", card.raw())
                    .with_meta("tributes", tributes.len()),
            );
            Ok(SetMonsterResult {
                card_set: card,
                tributes_used: tributes.len(),
            })
        })
    }

    /// Flip a face-down monster face-up in the chosen stance.
    ///
    /// Does not use the Normal Summon. Fires `on_flip` effects.
    pub fn flip_summon(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        card: CardRef,
        position: Stance,
    ) -> Result<FlipSummonResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "flip_summon", |turn| {
            require_main_phase(turn, "Flip Summon")?;
            require_no_chain(turn)?;
            turn.require_own(card, Zone::Board)?;
            let definition = turn.definition(card)?;
            let seat = turn.seat;

            let Some(entry) = turn.state.slot_mut(seat).board_card_mut(card) else {
                return Err(EngineError::CardNotInZone { card, zone: Zone::Board });
            };
            if !entry.is_face_down() {
                return Err(EngineError::illegal(format!("{} is already face-up", definition.name)));
            }
            entry.orientation = Orientation::FaceUp;
            entry.stance = position;
            entry.position_changed_this_turn = true;

            turn.record(
                NewEvent::new(EventType::FlipSummon, format!("{seat} Flip Summoned {}", definition.name))
                    .with_seat(seat)
                    .with_meta("cardId", card.raw())
                    .with_meta("cardName", definition.name.as_str())
                    .with_meta("position", position.as_str()),
            );

            let triggered = turn.with_effects(|state, ctx| fire_trigger(state, ctx, card, seat, Trigger::OnFlip));
            Ok(FlipSummonResult {
                card,
                card_flipped: definition.name.clone(),
                position,
                flip_effect: merged(triggered),
            })
        })
    }

    /// Switch a face-up monster between Attack and Defense Position.
    ///
    /// Allowed once per monster per turn, in a Main Phase, and not on the
    /// turn the monster was summoned.
    pub fn change_position(&mut self, caller: &Caller, lobby: &LobbyId, card: CardRef) -> Result<PositionChangeResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "change_position", |turn| {
            require_main_phase(turn, "change battle position")?;
            turn.require_own(card, Zone::Board)?;
            let definition = turn.definition(card)?;
            let seat = turn.seat;
            let current_turn = turn.state.turn_number;

            let Some(entry) = turn.state.slot_mut(seat).board_card_mut(card) else {
                return Err(EngineError::CardNotInZone { card, zone: Zone::Board });
            };
            if entry.is_face_down() {
                return Err(EngineError::illegal(format!(
                    "{} is face-down; Flip Summon it instead",
                    definition.name
                )));
            }
            if entry.position_changed_this_turn {
                return Err(EngineError::illegal(format!(
                    "{} already changed position this turn",
                    definition.name
                )));
            }
            if entry.summoned_on_turn == current_turn {
                return Err(EngineError::illegal(format!(
                    "{} cannot change position the turn it was summoned",
                    definition.name
                )));
            }
            entry.stance = entry.stance.toggled();
            entry.position_changed_this_turn = true;
            let position = entry.stance;

            turn.record(
                NewEvent::new(
                    EventType::PositionChanged,
                    format!("{} changed to {} position", definition.name, position.as_str()),
                )
                .with_seat(seat)
                .with_meta("cardId", card.raw())
                .with_meta("cardName", definition.name.as_str())
                .with_meta("position", position.as_str()),
            );
            Ok(PositionChangeResult { card, position })
        })
    }
}
