//! Chain protocol entry points.
//!
//! Either participant may add links and pass; the chain itself enforces
//! whose priority it is.

use crate::cards::{CardDefinition, CardType};
use crate::chain::{Chain, ChainLinkId, LinkResolution, ResolutionStatus};
use crate::core::{Caller, CardRef, EngineError, LobbyId, Result};
use crate::events::{EventType, NewEvent};
use crate::zones::{Zone, ZoneCard};

use super::game::{GameEngine, Turn, TurnLock};

/// Where the caller may activate `card` from onto the chain.
///
/// Spells come from the hand or a face-down zone card, Traps only from a
/// face-down zone card, and monster effects from a face-up monster.
fn chain_source(turn: &Turn<'_>, card: CardRef, definition: &CardDefinition) -> Result<Zone> {
    let slot = turn.state.slot(turn.seat);
    let set = slot.zone_card(card).is_some_and(ZoneCard::is_face_down);
    match definition.card_type {
        CardType::Spell | CardType::Equipment if slot.contains(Zone::Hand, card) => Ok(Zone::Hand),
        CardType::Spell | CardType::Equipment | CardType::Trap if set => Ok(Zone::SpellTrap),
        CardType::Spell | CardType::Equipment => Err(EngineError::CardNotInZone { card, zone: Zone::Hand }),
        CardType::Trap => Err(EngineError::CardNotInZone {
            card,
            zone: Zone::SpellTrap,
        }),
        CardType::Creature => match slot.board_card(card) {
            Some(monster) if !monster.is_face_down() => Ok(Zone::Board),
            _ => Err(EngineError::CardNotInZone { card, zone: Zone::Board }),
        },
    }
}

impl GameEngine {
    /// Put `card`'s first activatable effect on the chain.
    ///
    /// A Spell or Trap leaves its zone when it joins the chain and goes to
    /// the graveyard once its link resolves.
    pub fn add_to_chain(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        card: CardRef,
        targets: &[CardRef],
    ) -> Result<ChainLinkId> {
        self.transact(caller, lobby, TurnLock::AnyParticipant, "add_to_chain", |turn| {
            let definition = turn.definition(card)?;
            let seat = turn.seat;
            if turn.chain.links().iter().any(|link| link.card == card) {
                return Err(EngineError::Chain(format!("{} is already on the chain", definition.name)));
            }
            let from = chain_source(turn, card, definition)?;
            let Some((_, effect)) = turn.registry.ability(definition.id).on_resolution().next() else {
                return Err(EngineError::illegal(format!("{} has no effect to activate", definition.name)));
            };
            let effect = effect.clone();
            let effect_type = effect.kind.as_str();

            let id = turn.chain.add_link(card, seat, effect, targets)?;
            if from != Zone::Board {
                turn.state.slot_mut(seat).take_from(from, card);
                turn.state.chained.insert(card);
            }
            let number = turn.chain.len();
            turn.record(
                NewEvent::new(
                    EventType::ChainLinkAdded,
                    format!("{} added to the chain as link {number}", definition.name),
                )
                .with_seat(seat)
                .with_meta("cardId", card.raw())
                .with_meta("cardName", definition.name.as_str())
                .with_meta("chainLink", number)
                .with_meta("effectType", effect_type)
                .with_meta("from", from.as_str()),
            );
            Ok(id)
        })
    }

    /// Decline to respond to the chain.
    pub fn pass_priority(&mut self, caller: &Caller, lobby: &LobbyId) -> Result<ResolutionStatus> {
        self.transact(caller, lobby, TurnLock::AnyParticipant, "pass_priority", |turn| {
            let seat = turn.seat;
            let status = turn.chain.pass_priority(seat)?;
            tracing::debug!(%seat, ?status, "priority passed");
            Ok(status)
        })
    }

    /// Resolve a chain both players have passed on, newest link first.
    pub fn resolve_chain(&mut self, caller: &Caller, lobby: &LobbyId) -> Result<Vec<LinkResolution>> {
        self.transact(caller, lobby, TurnLock::AnyParticipant, "resolve_chain", |turn| {
            let mut chain = std::mem::take(&mut turn.chain);
            let resolved = turn.with_effects(|state, ctx| chain.resolve(state, ctx));
            turn.chain = chain;
            resolved
        })
    }

    /// The chain as it stands.
    pub fn get_current_chain(&self, lobby: &LobbyId) -> Result<Chain> {
        self.get_match(lobby).map(|m| m.chain.clone())
    }
}
