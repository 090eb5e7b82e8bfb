//! The chain: a LIFO stack of activations with two-player priority.
//!
//! ```text
//! Idle --add_link--> PriorityWindow(other seat)
//! PriorityWindow --add_link by awaiting seat--> PriorityWindow(other seat), passes reset
//! PriorityWindow --pass, first--> PriorityWindow(other seat)
//! PriorityWindow --pass, second in a row--> Resolving
//! Resolving --resolve--> Idle
//! ```
//!
//! Adding a link and opening the next priority window happen in one step,
//! so there is no observable "building" state between them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardRef, EngineError, GameState, Result, Seat};
use crate::effects::{Effect, EffectOutcome, EffectRequest, ExecContext};
use crate::events::{EventType, NewEvent};
use crate::zones::{DeckPosition, Pile};

use super::link::{ChainLink, ChainLinkId, LinkResolution};
use super::ResolutionStatus;

/// Where the chain is in its protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainState {
    /// No links.
    #[default]
    Idle,

    /// `awaiting` may respond with a new link or pass.
    PriorityWindow { awaiting: Seat, passes: u8 },

    /// Both players passed; the chain must be resolved.
    Resolving,
}

/// A chain of activations for one match.
///
/// The chain owns its links; `resolve` consumes them newest-first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Index 0 = first link, last = newest.
    links: Vec<ChainLink>,

    state: ChainState,

    next_id: u32,
}

impl Chain {
    /// An empty, idle chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Links in activation order (first to newest).
    #[must_use]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The newest link, which resolves first.
    #[must_use]
    pub fn peek_top(&self) -> Option<&ChainLink> {
        self.links.last()
    }

    /// The seat that may respond next, if a priority window is open.
    #[must_use]
    pub fn priority_player(&self) -> Option<Seat> {
        match self.state {
            ChainState::PriorityWindow { awaiting, .. } => Some(awaiting),
            _ => None,
        }
    }

    // === Protocol ===

    /// Add a link and hand priority to the other seat.
    ///
    /// While a priority window is open only the awaiting seat may add a
    /// link; nothing may be added while the chain is resolving. A card can
    /// hold at most one link.
    pub fn add_link(
        &mut self,
        card: CardRef,
        controller: Seat,
        effect: Effect,
        targets: &[CardRef],
    ) -> Result<ChainLinkId> {
        match self.state {
            ChainState::Resolving => {
                return Err(EngineError::Chain("the chain is resolving".to_string()));
            }
            ChainState::PriorityWindow { awaiting, .. } if awaiting != controller => {
                return Err(EngineError::Chain(format!("{controller} does not have priority")));
            }
            _ => {}
        }
        if self.links.iter().any(|link| link.card == card) {
            return Err(EngineError::Chain(format!("{card} is already on the chain")));
        }

        let id = ChainLinkId::new(self.next_id);
        self.next_id += 1;
        self.links.push(ChainLink {
            id,
            number: self.links.len() + 1,
            card,
            controller,
            effect,
            targets: SmallVec::from_slice(targets),
        });

        self.state = ChainState::PriorityWindow {
            awaiting: controller.other(),
            passes: 0,
        };
        Ok(id)
    }

    /// Decline to respond.
    ///
    /// The second consecutive pass moves the chain to `Resolving`.
    pub fn pass_priority(&mut self, seat: Seat) -> Result<ResolutionStatus> {
        let ChainState::PriorityWindow { awaiting, passes } = self.state else {
            return Err(EngineError::Chain(match self.state {
                ChainState::Resolving => "the chain is already resolving".to_string(),
                _ => "there is no chain to respond to".to_string(),
            }));
        };
        if seat != awaiting {
            return Err(EngineError::Chain(format!("{seat} does not have priority")));
        }

        let passes = passes + 1;
        if passes >= 2 {
            self.state = ChainState::Resolving;
            Ok(ResolutionStatus::ReadyToResolve)
        } else {
            self.state = ChainState::PriorityWindow {
                awaiting: seat.other(),
                passes,
            };
            Ok(ResolutionStatus::WaitingForPriority(seat.other()))
        }
    }

    /// Resolve every link, newest first, and return to `Idle`.
    ///
    /// A link that fails (target gone, protection, negation) is logged and
    /// skipped; it never stops the remaining links from resolving.
    pub fn resolve(&mut self, state: &mut GameState, ctx: &mut ExecContext<'_>) -> Result<Vec<LinkResolution>> {
        if self.state != ChainState::Resolving {
            return Err(EngineError::Chain(
                "both players must pass priority before the chain resolves".to_string(),
            ));
        }

        let runner = ctx.runner;
        let mut resolutions = Vec::with_capacity(self.links.len());
        while let Some(link) = self.links.pop() {
            let outcome = if state.negated.contains(&link.card) {
                let name = ctx.card_name(state, link.card);
                EffectOutcome::fail(format!("{name}'s effect was negated"))
            } else {
                let request = EffectRequest::new(&link.effect, link.controller)
                    .from_source(link.card)
                    .with_targets(&link.targets);
                runner.run(state, ctx, &request)
            };
            spend(state, ctx, link.card);

            if !outcome.success {
                tracing::warn!(link = %link.id, number = link.number, message = %outcome.message, "chain link failed");
            }
            resolutions.push(LinkResolution {
                link: link.id,
                number: link.number,
                card: link.card,
                controller: link.controller,
                outcome,
            });
        }

        let order: Vec<usize> = resolutions.iter().map(|r| r.number).collect();
        ctx.record(
            state,
            NewEvent::new(EventType::ChainResolved, format!("Chain of {} link(s) resolved", order.len()))
                .with_meta("order", serde_json::json!(order))
                .with_meta("failed", resolutions.iter().filter(|r| !r.outcome.success).count()),
        );

        self.state = ChainState::Idle;
        Ok(resolutions)
    }

    /// Drop every link and return to `Idle`.
    ///
    /// Lifted Spell and Trap cards go to their owners' graveyards.
    pub fn clear(&mut self, state: &mut GameState) {
        for link in self.links.drain(..) {
            if state.chained.remove(&link.card).is_some() {
                state.place_in_pile(link.card, Pile::Graveyard, DeckPosition::Top);
            }
        }
        self.state = ChainState::Idle;
    }
}

/// Send a resolved Spell or Trap card from the chain to its owner's
/// graveyard. Monster links leave their card where it is.
fn spend(state: &mut GameState, ctx: &mut ExecContext<'_>, card: CardRef) {
    if state.chained.remove(&card).is_none() || !state.place_in_pile(card, Pile::Graveyard, DeckPosition::Top) {
        return;
    }
    let Some(owner) = state.owner_of(card) else {
        return;
    };
    let name = ctx.card_name(state, card);
    ctx.record(
        state,
        NewEvent::new(EventType::CardToGraveyard, format!("{name} was sent to the graveyard"))
            .with_seat(owner)
            .with_meta("cardId", card.raw())
            .with_meta("cardName", name.as_str())
            .with_meta("reason", "spent"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_with_link() -> Chain {
        let mut chain = Chain::new();
        chain
            .add_link(CardRef::new(1), Seat::Host, Effect::damage(300), &[])
            .unwrap();
        chain
    }

    #[test]
    fn test_new_chain_is_idle() {
        let chain = Chain::new();
        assert_eq!(chain.state(), ChainState::Idle);
        assert!(chain.is_empty());
        assert_eq!(chain.priority_player(), None);
    }

    #[test]
    fn test_add_link_opens_window_for_other_seat() {
        let chain = chain_with_link();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.priority_player(), Some(Seat::Opponent));
        assert_eq!(chain.peek_top().unwrap().number, 1);
    }

    #[test]
    fn test_two_passes_resolve() {
        let mut chain = chain_with_link();

        let first = chain.pass_priority(Seat::Opponent).unwrap();
        assert_eq!(first, ResolutionStatus::WaitingForPriority(Seat::Host));

        let second = chain.pass_priority(Seat::Host).unwrap();
        assert_eq!(second, ResolutionStatus::ReadyToResolve);
        assert_eq!(chain.state(), ChainState::Resolving);
    }

    #[test]
    fn test_wrong_seat_cannot_pass_or_respond() {
        let mut chain = chain_with_link();
        assert!(matches!(chain.pass_priority(Seat::Host), Err(EngineError::Chain(_))));
        assert!(chain
            .add_link(CardRef::new(2), Seat::Host, Effect::draw(1), &[])
            .is_err());
    }

    #[test]
    fn test_response_resets_passes() {
        let mut chain = chain_with_link();
        chain.pass_priority(Seat::Opponent).unwrap();
        chain
            .add_link(CardRef::new(2), Seat::Host, Effect::draw(1), &[])
            .unwrap();

        assert_eq!(
            chain.state(),
            ChainState::PriorityWindow { awaiting: Seat::Opponent, passes: 0 }
        );
        assert_eq!(chain.peek_top().unwrap().number, 2);
    }

    #[test]
    fn test_no_links_while_resolving() {
        let mut chain = chain_with_link();
        chain.pass_priority(Seat::Opponent).unwrap();
        chain.pass_priority(Seat::Host).unwrap();
        assert!(chain
            .add_link(CardRef::new(3), Seat::Opponent, Effect::draw(1), &[])
            .is_err());
    }

    #[test]
    fn test_pass_on_idle_chain_fails() {
        let mut chain = Chain::new();
        assert!(chain.pass_priority(Seat::Host).is_err());
    }

    #[test]
    fn test_card_holds_one_link() {
        let mut chain = chain_with_link();
        let err = chain
            .add_link(CardRef::new(1), Seat::Opponent, Effect::draw(1), &[])
            .unwrap_err();
        assert!(matches!(err, EngineError::Chain(msg) if msg.contains("already on the chain")));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.priority_player(), Some(Seat::Opponent));
    }

    #[test]
    fn test_clear() {
        let mut state = GameState::new(&crate::core::RulesConfig::default(), 7);
        let card = state.add_card(Seat::Host, crate::cards::CardId::new(1));
        state.slot_mut(Seat::Host).deck.pop_front();
        state.chained.insert(card);

        let mut chain = Chain::new();
        chain.add_link(card, Seat::Host, Effect::damage(300), &[]).unwrap();
        chain.clear(&mut state);

        assert!(chain.is_empty());
        assert_eq!(chain.state(), ChainState::Idle);
        assert!(state.chained.is_empty());
        assert!(state.slot(Seat::Host).graveyard.contains(&card));
        assert!(state.audit_zones().is_ok());
    }
}
